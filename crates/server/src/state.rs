//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::Store;
use crate::services::images::{FetchError, ImageFetcher};
use crate::services::tracking::{TrackingClient, TrackingError};
use crate::services::uploads::UploadStore;

/// Error creating the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("image fetcher: {0}")]
    ImageFetcher(#[from] FetchError),
    #[error("tracking client: {0}")]
    TrackingClient(#[from] TrackingError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the store handle and outbound clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Store,
    images: ImageFetcher,
    tracking: TrackingClient,
    uploads: UploadStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if an outbound HTTP client fails to build.
    pub fn new(config: ServerConfig, store: Store) -> Result<Self, StateError> {
        let images = ImageFetcher::new()?;
        let tracking = TrackingClient::new(&config.tracking)?;
        let uploads = UploadStore::new(&config.uploads_dir);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                images,
                tracking,
                uploads,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the document store handle.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the remote image fetcher.
    #[must_use]
    pub fn images(&self) -> &ImageFetcher {
        &self.inner.images
    }

    /// Get a reference to the tracking API client.
    #[must_use]
    pub fn tracking(&self) -> &TrackingClient {
        &self.inner.tracking
    }

    /// Get a reference to the upload store.
    #[must_use]
    pub fn uploads(&self) -> &UploadStore {
        &self.inner.uploads
    }
}
