//! Shipment-tracking API client.
//!
//! A thin passthrough: the order code goes out as a query parameter with
//! the configured credential in the `Token` header, and the upstream JSON
//! body comes back verbatim. No retries.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use thiserror::Error;

use artemia_core::OrderCode;

use super::{BodyReadError, read_body_capped};
use crate::config::TrackingConfig;

/// Bound on a single tracking request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Cap on the upstream response size.
const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Errors that can occur when calling the tracking API.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// The configured credential is not a valid header value.
    #[error("invalid tracking token: {0}")]
    InvalidToken(String),

    /// HTTP request failed (connect, timeout, protocol).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Upstream body is not valid JSON.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading the body failed or exceeded the size cap.
    #[error(transparent)]
    Body(#[from] BodyReadError),
}

/// Client for the external shipment-tracking API.
#[derive(Debug, Clone)]
pub struct TrackingClient {
    client: reqwest::Client,
    base_url: String,
}

impl TrackingClient {
    /// Create a new tracking client.
    ///
    /// The credential is installed as a default `Token` header so every
    /// request carries it.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is not a valid header value or
    /// the HTTP client fails to build.
    pub fn new(config: &TrackingConfig) -> Result<Self, TrackingError> {
        let mut token = HeaderValue::from_str(config.token.expose_secret())
            .map_err(|e| TrackingError::InvalidToken(e.to_string()))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("Token", token);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch the upstream tracking state for an order code.
    ///
    /// Returns the upstream JSON body unmodified.
    ///
    /// # Errors
    ///
    /// Returns `TrackingError` if the request fails, the upstream answers
    /// with a non-success status, or the body is not JSON.
    pub async fn track(&self, order_code: &OrderCode) -> Result<Value, TrackingError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("order_code", order_code.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = read_body_capped(response, MAX_RESPONSE_BYTES).await?;

        if !status.is_success() {
            return Err(TrackingError::Api {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
