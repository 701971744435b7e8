//! Document-store access layer.
//!
//! One repository per collection, all sharing a [`Store`] handle:
//!
//! - `products` - catalog products
//! - `subpages` - catalog subpages
//! - `users` - shop users (unique index on `username`)
//! - `orders` - placed orders (unique index on `orderCode`)
//! - `themes` - the singleton site theme
//!
//! The driver connects lazily: constructing the [`Store`] only parses the
//! connection string, so startup never blocks on the database. [`Store::ping`]
//! and [`Store::ensure_indexes`] surface availability at boot without
//! preventing the listener from starting.

pub mod orders;
pub mod products;
pub mod subpages;
pub mod theme;
pub mod users;

use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use subpages::SubpageRepository;
pub use theme::ThemeRepository;
pub use users::UserRepository;

/// Database used when the connection string does not name one.
const DEFAULT_DATABASE: &str = "artemia-shop";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Driver-level failure (connection, query, serialization).
    #[error("database error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Unique-index violation (e.g. duplicate username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Shared handle to the document store.
///
/// Cheap to clone; all repositories are constructed from it per request.
#[derive(Clone)]
pub struct Store {
    database: Database,
}

impl Store {
    /// Create a store handle from a connection string.
    ///
    /// The database name is taken from the URI path, falling back to
    /// `artemia-shop`. No I/O happens here beyond URI parsing; the driver
    /// establishes connections on first use.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the connection string is invalid.
    pub async fn connect(uri: &SecretString) -> Result<Self, RepositoryError> {
        let client = Client::with_uri_str(uri.expose_secret()).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        Ok(Self { database })
    }

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the ping fails.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Create the unique indexes the data model relies on.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if index creation fails (e.g. the
    /// store is unreachable).
    pub async fn ensure_indexes(&self) -> Result<(), RepositoryError> {
        UserRepository::new(self).ensure_indexes().await?;
        OrderRepository::new(self).ensure_indexes().await?;
        Ok(())
    }

    /// The name of the selected database.
    #[must_use]
    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    pub(crate) fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }
}

/// Whether a driver error is a unique-index violation.
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == 11000
    )
}
