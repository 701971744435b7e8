//! Theme route handlers.

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde_json::{Value, json};

use crate::db::ThemeRepository;
use crate::error::AppError;
use crate::models::{Theme, ThemeDraft};
use crate::routes::forms::ThemeForm;
use crate::state::AppState;

/// Replace the singleton theme, creating it on first write.
///
/// Updates are full replacements: an upsert without a logo file clears any
/// previously stored logo, exactly like the other fields.
pub async fn upsert(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Theme>, AppError> {
    let form = ThemeForm::from_multipart(&mut multipart).await?;

    let logo = match form.logo {
        Some(file) => {
            state
                .uploads()
                .save(file.filename.as_deref(), &file.bytes)
                .await?
        }
        None => String::new(),
    };

    let draft = ThemeDraft {
        color: form.color,
        name: form.name,
        logo,
    };

    let theme = ThemeRepository::new(state.store()).upsert(&draft).await?;
    Ok(Json(theme))
}

/// Fetch the theme, or `{}` when none has been written yet.
pub async fn show(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let theme = ThemeRepository::new(state.store()).find().await?;

    match theme {
        Some(theme) => {
            let body = serde_json::to_value(theme)
                .map_err(|e| AppError::Internal(format!("theme serialization: {e}")))?;
            Ok(Json(body))
        }
        None => Ok(Json(json!({}))),
    }
}
