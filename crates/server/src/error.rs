//! Unified error handling.
//!
//! Provides a unified `AppError` type that every route handler returns.
//! Failures become a JSON envelope `{"error": ..., "details"?: ...}` with
//! the appropriate status code; server-side failures are logged and their
//! details never reach the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::images::FetchError;
use crate::services::tracking::TrackingError;
use crate::services::uploads::UploadError;

/// Application-level error type for the shop API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Document-store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// A required field is missing or malformed.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Failed login or admin gate mismatch.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote image fetch failed.
    #[error("Image fetch error: {0}")]
    ImageFetch(#[from] FetchError),

    /// Tracking API call failed.
    #[error("Tracking error: {0}")]
    Tracking(#[from] TrackingError),

    /// Upload storage failed.
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error envelope returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Database(_) | Self::ImageFetch(_) | Self::Tracking(_) | Self::Upload(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Envelope body for this error, hiding server-side detail.
    fn body(&self) -> ErrorBody {
        match self {
            Self::Database(RepositoryError::Conflict(details)) => ErrorBody {
                error: "Conflict".to_string(),
                details: Some(details.clone()),
            },
            Self::Database(_) => ErrorBody {
                error: "Database error".to_string(),
                details: None,
            },
            Self::Validation(details) => ErrorBody {
                error: "Validation failed".to_string(),
                details: Some(details.clone()),
            },
            Self::Unauthorized(details) => ErrorBody {
                error: "Unauthorized".to_string(),
                details: Some(details.clone()),
            },
            Self::NotFound(details) => ErrorBody {
                error: "Not found".to_string(),
                details: Some(details.clone()),
            },
            Self::ImageFetch(_) | Self::Tracking(_) => ErrorBody {
                error: "Upstream fetch failed".to_string(),
                details: None,
            },
            Self::Upload(_) | Self::Internal(_) => ErrorBody {
                error: "Internal server error".to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        }

        (status, Json(self.body())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 64f000000000000000000001".to_string());
        assert_eq!(
            err.to_string(),
            "Not found: product 64f000000000000000000001"
        );

        let err = AppError::Validation("missing required field 'name'".to_string());
        assert_eq!(
            err.to_string(),
            "Validation failed: missing required field 'name'"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Validation("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict(
                "username 'alice' is taken".to_string()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::DataCorruption(
                "test".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_envelope_includes_details_for_client_errors() {
        let body = AppError::Validation("missing required field 'name'".to_string()).body();
        assert_eq!(body.error, "Validation failed");
        assert_eq!(body.details.as_deref(), Some("missing required field 'name'"));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["details"], "missing required field 'name'");
    }

    #[test]
    fn test_envelope_hides_details_for_server_errors() {
        let body =
            AppError::Database(RepositoryError::DataCorruption("secret".to_string())).body();
        assert_eq!(body.error, "Database error");
        assert!(body.details.is_none());

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("details").is_none());
    }
}
