//! HTTP route handlers for the shop API.
//!
//! # Route Structure
//!
//! ```text
//! # Products
//! GET    /api/products          - Product listing
//! POST   /api/products          - Create product (multipart)
//! PUT    /api/products/{id}     - Replace product (multipart)
//! DELETE /api/products/{id}     - Delete product
//!
//! # Subpages
//! POST   /api/subpages          - Create subpage
//! PUT    /api/subpages/{id}     - Rename subpage
//! DELETE /api/subpages/{id}     - Delete subpage
//!
//! # Theme (singleton)
//! GET    /api/theme             - Theme or {}
//! POST   /api/theme             - Upsert theme (multipart)
//!
//! # Users
//! POST   /api/users             - Register user
//! DELETE /api/users/{id}        - Delete user
//! POST   /api/login             - Exact-match credential login
//!
//! # Orders
//! GET    /api/orders            - Order listing
//! POST   /api/orders            - Create order
//! GET    /api/track/{orderCode} - Tracking proxy (verbatim upstream JSON)
//!
//! # Static
//! GET    /admin                 - Admin entry document (credential gated)
//! GET    /uploads/*             - Stored upload files
//! GET    /*                     - Storefront entry document (SPA fallback)
//! ```

pub mod forms;
pub mod orders;
pub mod products;
pub mod subpages;
pub mod theme;
pub mod tracking;
pub mod users;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use tower_http::services::{ServeDir, ServeFile};

use crate::error::AppError;
use crate::middleware::require_admin_access;
use crate::state::AppState;

/// Shared `{message}` response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Create a message response.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parse a path id into an object id.
///
/// # Errors
///
/// Returns `AppError::Validation` for anything that is not a valid hex
/// object id, before the data layer is reached.
pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::Validation(format!("invalid id '{id}'")))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/{id}", put(products::update).delete(products::delete))
}

/// Create the subpage routes router.
pub fn subpage_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(subpages::create))
        .route("/{id}", put(subpages::update).delete(subpages::delete))
}

/// Create the `/api` router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/subpages", subpage_routes())
        .route("/theme", get(theme::show).post(theme::upsert))
        .route("/users", post(users::create))
        .route("/users/{id}", delete(users::delete))
        .route("/orders", get(orders::list).post(orders::create))
        .route("/track/{order_code}", get(tracking::track))
        .route("/login", post(users::login))
}

/// Create all routes: the API, the gated admin entry document, stored
/// uploads, and the storefront fallback.
pub fn routes(state: &AppState) -> Router<AppState> {
    let public_dir = &state.config().public_dir;

    let admin_entry = Router::new()
        .route_service("/admin", ServeFile::new(public_dir.join("admin.html")))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_access,
        ));

    Router::new()
        .nest("/api", api_routes())
        .merge(admin_entry)
        .nest_service("/uploads", ServeDir::new(&state.config().uploads_dir))
        .fallback_service(
            ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html"))),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id_accepts_hex() {
        assert!(parse_object_id("64f000000000000000000001").is_ok());
    }

    #[test]
    fn test_parse_object_id_rejects_garbage() {
        assert!(matches!(
            parse_object_id("not-an-id"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(parse_object_id(""), Err(AppError::Validation(_))));
    }
}
