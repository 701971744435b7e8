//! User route handlers: registration, deletion, and login.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::{User, UserDraft};
use crate::routes::forms::{parse_body, require_field};
use crate::routes::{MessageResponse, parse_object_id};
use crate::state::AppState;

// =============================================================================
// Payload Types
// =============================================================================

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
}

// =============================================================================
// Handlers
// =============================================================================

/// Register a new user.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let request: CreateUserRequest = parse_body(body)?;

    let draft = UserDraft {
        username: require_field(request.username, "username")?,
        password: require_field(request.password, "password")?,
        phone: request.phone.filter(|p| !p.trim().is_empty()),
    };

    let user = UserRepository::new(state.store()).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Delete a user by id.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;

    if UserRepository::new(state.store()).delete(id).await? {
        Ok(Json(MessageResponse::new("User deleted")))
    } else {
        Err(AppError::NotFound(format!("user {id}")))
    }
}

/// Exact-match credential login.
///
/// Both fields are validated before any store query runs; a mismatch on
/// either is indistinguishable from the other in the response.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<LoginResponse>, AppError> {
    let request: LoginRequest = parse_body(body)?;
    let username = require_field(request.username, "username")?;
    let password = require_field(request.password, "password")?;

    let user = UserRepository::new(state.store())
        .find_by_credentials(&username, &password)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid username or password".to_string()))?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user,
    }))
}
