//! Database error types for spin-db.

use spin_core::errors::CoreError;
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Caller input was rejected before touching the store.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A mutation addressed an id that does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A write would break a reference between records.
    #[error("Integrity violation: {0}")]
    Integrity(String),

    /// The backend could not be opened or reached in time.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A row could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl DatabaseError {
    /// Whether the failure came from the storage layer rather than the caller.
    ///
    /// Callers may surface these as "try again later"; everything else is a
    /// problem with the request itself.
    #[must_use]
    pub const fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Unavailable(_) | Self::LibSql(_) | Self::Migration(_)
        )
    }
}

impl From<CoreError> for DatabaseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
        }
    }
}
