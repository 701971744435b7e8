//! Product route handlers.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::models::{Product, ProductDraft};
use crate::routes::forms::{ProductForm, UploadedFile};
use crate::routes::{MessageResponse, parse_object_id};
use crate::state::AppState;

/// List every product.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.store()).list().await?;
    Ok(Json(products))
}

/// Create a product from a multipart form.
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let form = ProductForm::from_multipart(&mut multipart).await?;
    let image = resolve_image(&state, form.image, form.url.as_deref()).await?;

    let draft = ProductDraft {
        name: form.name,
        price: form.price,
        category: form.category,
        image,
    };

    let product = ProductRepository::new(state.store()).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace every field of an existing product.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<Product>, AppError> {
    let id = parse_object_id(&id)?;
    let form = ProductForm::from_multipart(&mut multipart).await?;
    let image = resolve_image(&state, form.image, form.url.as_deref()).await?;

    let draft = ProductDraft {
        name: form.name,
        price: form.price,
        category: form.category,
        image,
    };

    let updated = ProductRepository::new(state.store())
        .update(id, &draft)
        .await?;

    updated
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Delete a product by id.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;

    if ProductRepository::new(state.store()).delete(id).await? {
        Ok(Json(MessageResponse::new("Product deleted")))
    } else {
        Err(AppError::NotFound(format!("product {id}")))
    }
}

/// Resolve the image value stored with a product.
///
/// An uploaded file becomes an `/uploads/...` path; a source URL is fetched
/// and embedded as a data URI; neither leaves the image empty. Supplying
/// both is rejected so the caller never has one source silently override
/// the other.
pub(crate) async fn resolve_image(
    state: &AppState,
    file: Option<UploadedFile>,
    url: Option<&str>,
) -> Result<String, AppError> {
    match (file, url) {
        (Some(_), Some(_)) => Err(AppError::Validation(
            "provide either an image file or a url, not both".to_string(),
        )),
        (Some(file), None) => Ok(state
            .uploads()
            .save(file.filename.as_deref(), &file.bytes)
            .await?),
        (None, Some(url)) => Ok(state.images().fetch_as_data_uri(url).await?),
        (None, None) => Ok(String::new()),
    }
}
