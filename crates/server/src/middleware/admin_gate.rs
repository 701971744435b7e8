//! Admin access gate.
//!
//! A pre-route filter on the admin entry document: the `Authorization`
//! header must match the pre-shared credential exactly. This is a static
//! secret comparison, not per-user authentication; there is no identity,
//! hashing, or expiry behind it.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use secrecy::{ExposeSecret, SecretString};

use crate::error::AppError;
use crate::state::AppState;

/// Reject requests that do not carry the admin credential.
///
/// With no credential configured the gate fails closed and rejects
/// everything; startup logs a warning pointing at `ADMIN_ACCESS_TOKEN`.
pub async fn require_admin_access(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if credential_matches(state.config().admin_access_token.as_ref(), provided) {
        next.run(request).await
    } else {
        AppError::Unauthorized("admin access requires a valid credential".to_string())
            .into_response()
    }
}

/// Exact comparison of the provided header against the configured secret.
fn credential_matches(expected: Option<&SecretString>, provided: Option<&str>) -> bool {
    match (expected, provided) {
        (Some(expected), Some(provided)) => expected.expose_secret() == provided,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_credential_passes() {
        let expected = SecretString::from("Basic YWRtaW46czNjcjN0");
        assert!(credential_matches(
            Some(&expected),
            Some("Basic YWRtaW46czNjcjN0")
        ));
    }

    #[test]
    fn test_wrong_credential_fails() {
        let expected = SecretString::from("Basic YWRtaW46czNjcjN0");
        assert!(!credential_matches(Some(&expected), Some("Basic d3Jvbmc=")));
    }

    #[test]
    fn test_missing_header_fails() {
        let expected = SecretString::from("Basic YWRtaW46czNjcjN0");
        assert!(!credential_matches(Some(&expected), None));
    }

    #[test]
    fn test_unconfigured_gate_fails_closed() {
        assert!(!credential_matches(None, Some("anything")));
        assert!(!credential_matches(None, None));
    }
}
