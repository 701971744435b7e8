//! Outbound HTTP clients and upload storage.

pub mod images;
pub mod tracking;
pub mod uploads;

use thiserror::Error;

/// Errors that can occur while reading a capped response body.
#[derive(Debug, Error)]
pub enum BodyReadError {
    /// Reading the body failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body exceeded the configured cap.
    #[error("response body exceeded {max} bytes")]
    TooLarge {
        /// Maximum allowed size in bytes.
        max: usize,
    },
}

/// Read a response body, aborting once it exceeds `max` bytes.
///
/// Outbound fetches have no trusted size, so every client in this module
/// reads through this cap instead of buffering the body blindly.
pub(crate) async fn read_body_capped(
    mut response: reqwest::Response,
    max: usize,
) -> Result<Vec<u8>, BodyReadError> {
    if let Some(length) = response.content_length() {
        if length > max as u64 {
            return Err(BodyReadError::TooLarge { max });
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > max {
            return Err(BodyReadError::TooLarge { max });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
