//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TRACKING_API_TOKEN` - Credential for the shipment-tracking API
//!
//! ## Optional
//! - `SERVER_HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 3000)
//! - `MONGODB_URI` - Store connection string
//!   (default: mongodb://localhost:27017/artemia-shop)
//! - `UPLOADS_DIR` - Directory for stored upload files (default: uploads)
//! - `PUBLIC_DIR` - Directory with the entry documents (default: public)
//! - `TRACKING_API_URL` - Shipment-tracking API base URL
//! - `ADMIN_ACCESS_TOKEN` - Pre-shared credential for the `/admin` gate;
//!   when unset the gate rejects every request

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/artemia-shop";
const DEFAULT_TRACKING_URL: &str = "https://donhang.ghn.vn/api/v1/tracking";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Document store connection string (may contain credentials)
    pub mongodb_uri: SecretString,
    /// Directory where uploaded files are stored
    pub uploads_dir: PathBuf,
    /// Directory with the storefront and admin entry documents
    pub public_dir: PathBuf,
    /// Shipment-tracking API configuration
    pub tracking: TrackingConfig,
    /// Pre-shared credential for the `/admin` gate (gate rejects everything
    /// when unset)
    pub admin_access_token: Option<SecretString>,
}

/// Shipment-tracking API configuration.
///
/// Implements `Debug` manually to redact the credential.
#[derive(Clone)]
pub struct TrackingConfig {
    /// Tracking API base URL
    pub base_url: String,
    /// Credential sent as the `Token` header on every tracking request
    pub token: SecretString,
}

impl std::fmt::Debug for TrackingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SERVER_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SERVER_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        let mongodb_uri =
            SecretString::from(get_env_or_default("MONGODB_URI", DEFAULT_MONGODB_URI));
        let uploads_dir = PathBuf::from(get_env_or_default("UPLOADS_DIR", "uploads"));
        let public_dir = PathBuf::from(get_env_or_default("PUBLIC_DIR", "public"));

        let tracking = TrackingConfig::from_env()?;
        let admin_access_token = get_optional_env("ADMIN_ACCESS_TOKEN").map(SecretString::from);

        Ok(Self {
            host,
            port,
            mongodb_uri,
            uploads_dir,
            public_dir,
            tracking,
            admin_access_token,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl TrackingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: get_env_or_default("TRACKING_API_URL", DEFAULT_TRACKING_URL),
            token: get_required_secret("TRACKING_API_TOKEN")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            mongodb_uri: SecretString::from(DEFAULT_MONGODB_URI),
            uploads_dir: PathBuf::from("uploads"),
            public_dir: PathBuf::from("public"),
            tracking: TrackingConfig {
                base_url: DEFAULT_TRACKING_URL.to_string(),
                token: SecretString::from("test-tracking-token"),
            },
            admin_access_token: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_tracking_config_debug_redacts_token() {
        let config = test_config();
        let debug_output = format!("{:?}", config.tracking);

        assert!(debug_output.contains(DEFAULT_TRACKING_URL));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("test-tracking-token"));
    }

    #[test]
    fn test_default_mongodb_uri_names_store_database() {
        assert!(DEFAULT_MONGODB_URI.ends_with("/artemia-shop"));
    }
}
