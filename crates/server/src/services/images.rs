//! Remote image fetching.
//!
//! Products and the theme may take their image from a caller-supplied URL
//! instead of an uploaded file. The image is fetched once, synchronously
//! from the request's point of view, and embedded in the document as a
//! Base64 data URI.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use url::Url;

use super::{BodyReadError, read_body_capped};

/// Bound on a single image fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Cap on the fetched image size.
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Content type assumed when the upstream does not send one.
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Errors that can occur when fetching a remote image.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The supplied URL does not parse.
    #[error("invalid image url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP request failed (connect, timeout, protocol).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream returned status {0}")]
    Status(u16),

    /// Reading the body failed or exceeded the size cap.
    #[error(transparent)]
    Body(#[from] BodyReadError),
}

/// HTTP client for turning remote images into data URIs.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
}

impl ImageFetcher {
    /// Create a new image fetcher with a bounded request timeout.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client fails to build.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client })
    }

    /// Fetch `raw_url` and re-encode the response body as a data URI.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the URL is invalid, the request fails, the
    /// upstream answers with a non-success status, or the body exceeds the
    /// size cap.
    pub async fn fetch_as_data_uri(&self, raw_url: &str) -> Result<String, FetchError> {
        let url = Url::parse(raw_url)?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map_or_else(|| DEFAULT_CONTENT_TYPE.to_owned(), strip_parameters);

        let bytes = read_body_capped(response, MAX_IMAGE_BYTES).await?;

        Ok(encode_data_uri(&content_type, &bytes))
    }
}

/// Encode bytes as a `data:<type>;base64,...` URI.
#[must_use]
pub fn encode_data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{content_type};base64,{}", BASE64.encode(bytes))
}

/// Strip media-type parameters (`; charset=...`) from a content type.
fn strip_parameters(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_data_uri() {
        assert_eq!(encode_data_uri("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_encode_data_uri_empty_body() {
        assert_eq!(encode_data_uri("image/jpeg", b""), "data:image/jpeg;base64,");
    }

    #[test]
    fn test_strip_parameters() {
        assert_eq!(strip_parameters("image/png; charset=utf-8"), "image/png");
        assert_eq!(strip_parameters("image/png"), "image/png");
    }

    #[test]
    fn test_default_content_type_matches_legacy_uploads() {
        assert_eq!(DEFAULT_CONTENT_TYPE, "image/jpeg");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(Url::parse("not a url").is_err());
    }
}
