//! Request payload parsing and validation.
//!
//! Request bodies are duck-typed on the wire: any field may be absent or
//! carry the wrong type. Every operation therefore goes through an explicit
//! payload struct here, and anything malformed is rejected with a 400
//! before the data layer is reached.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;
use serde::de::DeserializeOwned;
use serde_json::Value;

use artemia_core::Price;

use crate::error::AppError;

// =============================================================================
// Multipart
// =============================================================================

/// A file field buffered from a multipart request.
#[derive(Debug)]
pub struct UploadedFile {
    /// Client-supplied filename, if any.
    pub filename: Option<String>,
    /// Full file content.
    pub bytes: Bytes,
}

/// All fields of a multipart request, buffered for validation.
///
/// Buffering first means a request failing validation never leaves a
/// half-written upload behind.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Drain a multipart request into memory.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the body is not valid multipart.
    pub async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if field.file_name().is_some() {
                let filename = field
                    .file_name()
                    .map(str::to_owned)
                    .filter(|f| !f.is_empty());
                let bytes = field.bytes().await.map_err(malformed)?;
                form.files.insert(name, UploadedFile { filename, bytes });
            } else {
                let text = field.text().await.map_err(malformed)?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// A text field, treating blank submissions as absent.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// A required text field.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the field is absent or blank.
    pub fn require_text(&self, name: &str) -> Result<String, AppError> {
        self.text(name)
            .map(str::to_owned)
            .ok_or_else(|| missing_field(name))
    }

    /// Take a buffered file field, treating empty uploads as absent.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name).filter(|f| !f.bytes.is_empty())
    }
}

fn malformed(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("malformed multipart body: {err}"))
}

/// The validated multipart payload for product create and update.
#[derive(Debug)]
pub struct ProductForm {
    pub name: String,
    pub price: Price,
    pub category: String,
    /// Remote image source, mutually exclusive with `image`.
    pub url: Option<String>,
    /// Uploaded image file, mutually exclusive with `url`.
    pub image: Option<UploadedFile>,
}

impl ProductForm {
    /// Parse and validate a product multipart request.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a malformed body, a missing
    /// required field, or a price that is not a non-negative number.
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = MultipartForm::read(multipart).await?;

        let name = form.require_text("name")?;
        let price = parse_price(&form.require_text("price")?)?;
        let category = form.require_text("category")?;
        let url = form.text("url").map(str::to_owned);
        let image = form.take_file("image");

        Ok(Self {
            name,
            price,
            category,
            url,
            image,
        })
    }
}

/// The validated multipart payload for theme upserts.
#[derive(Debug)]
pub struct ThemeForm {
    pub color: String,
    pub name: String,
    pub logo: Option<UploadedFile>,
}

impl ThemeForm {
    /// Parse and validate a theme multipart request.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a malformed body or a missing
    /// required field.
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = MultipartForm::read(multipart).await?;

        let color = form.require_text("color")?;
        let name = form.require_text("name")?;
        let logo = form.take_file("logo");

        Ok(Self { color, name, logo })
    }
}

fn parse_price(raw: &str) -> Result<Price, AppError> {
    let amount: f64 = raw
        .parse()
        .map_err(|_| AppError::Validation("field 'price' must be a number".to_string()))?;

    Price::parse(amount).map_err(|e| AppError::Validation(format!("invalid price: {e}")))
}

// =============================================================================
// JSON
// =============================================================================

/// `Validation` error for a missing required field.
pub(crate) fn missing_field(name: &str) -> AppError {
    AppError::Validation(format!("missing required field '{name}'"))
}

/// A required field from an already-deserialized JSON body.
///
/// # Errors
///
/// Returns `AppError::Validation` when the field is absent or blank.
pub(crate) fn require_field(value: Option<String>, name: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing_field(name))
}

/// Deserialize a JSON body into a payload struct.
///
/// Going through `Value` first keeps type mismatches a 400 rather than the
/// extractor's default rejection.
///
/// # Errors
///
/// Returns `AppError::Validation` when the body does not fit the payload
/// shape.
pub(crate) fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("malformed request body: {e}")))
}
