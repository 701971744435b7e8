//! Subpage route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;

use crate::db::SubpageRepository;
use crate::error::AppError;
use crate::models::Subpage;
use crate::routes::forms::{parse_body, require_field};
use crate::routes::{MessageResponse, parse_object_id};
use crate::state::AppState;

/// Subpage create/update payload.
#[derive(Debug, Deserialize)]
pub struct SubpageRequest {
    pub name: Option<String>,
}

/// Create a subpage.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Subpage>), AppError> {
    let request: SubpageRequest = parse_body(body)?;
    let name = require_field(request.name, "name")?;

    let subpage = SubpageRepository::new(state.store()).create(&name).await?;
    Ok((StatusCode::CREATED, Json(subpage)))
}

/// Rename an existing subpage.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Subpage>, AppError> {
    let id = parse_object_id(&id)?;
    let request: SubpageRequest = parse_body(body)?;
    let name = require_field(request.name, "name")?;

    let updated = SubpageRepository::new(state.store()).update(id, &name).await?;

    updated
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("subpage {id}")))
}

/// Delete a subpage by id.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;

    if SubpageRepository::new(state.store()).delete(id).await? {
        Ok(Json(MessageResponse::new("Subpage deleted")))
    } else {
        Err(AppError::NotFound(format!("subpage {id}")))
    }
}
