//! Service layer exposing the store's operations.
//!
//! `SpinService` wraps `SpinDb` (raw database access). All repo methods are
//! implemented as `impl SpinService` blocks under `repos/`, and every one of
//! them runs through `SpinDb::with_connection`, so none of them branch on
//! the backend type.

use std::time::Duration;

use spin_config::SpinConfig;

use crate::error::DatabaseError;
use crate::{SpinDb, StoreBackend};

/// The task and activity store.
///
/// Build one per process and pass it by reference to whatever needs it.
pub struct SpinService {
    db: SpinDb,
}

impl SpinService {
    /// Open a store on an explicit backend.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the backend cannot be opened or migrated.
    pub async fn open(
        backend: StoreBackend,
        remote_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: SpinDb::open(backend, remote_timeout).await?,
        })
    }

    /// Open the store the configuration describes.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the backend cannot be opened or migrated.
    pub async fn from_config(config: &SpinConfig) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: SpinDb::open_from_config(config).await?,
        })
    }

    /// Open a store on a local file, or in memory for `":memory:"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(path: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: SpinDb::open_local(path).await?,
        })
    }

    /// Create from an existing `SpinDb` (for testing).
    #[must_use]
    pub const fn from_db(db: SpinDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &SpinDb {
        &self.db
    }
}
