//! # spin-db
//!
//! libSQL storage for the task spinner.
//!
//! Holds the two persisted collections (tasks and spin history) and the
//! read-only aggregate queries built on top of them. The same repositories
//! run against a local database file, a private in-memory database, or a
//! remote Turso database reached through libSQL's own HTTP transport.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29).

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::fmt;
use std::future::Future;
use std::time::Duration;

use error::DatabaseError;
use libsql::Builder;
use spin_config::SpinConfig;
use tracing::{info, warn};

/// Remote operation timeout used when none is configured.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Where persisted state lives. Fixed when the store is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// A local libSQL database file.
    Local { path: String },
    /// A private in-memory database, discarded on drop.
    Memory,
    /// A remote Turso database.
    Remote { url: String, auth_token: String },
}

impl StoreBackend {
    /// Pick the backend described by the loaded configuration.
    ///
    /// A fully configured `[turso]` section wins over the local path.
    #[must_use]
    pub fn from_config(config: &SpinConfig) -> Self {
        if config.turso.is_configured() {
            Self::Remote {
                url: config.turso.url.clone(),
                auth_token: config.turso.auth_token.clone(),
            }
        } else if config.database.is_in_memory() {
            Self::Memory
        } else {
            Self::Local {
                path: config.database.path.clone(),
            }
        }
    }

    /// Local file backend, or the in-memory backend for `":memory:"`.
    #[must_use]
    pub fn local(path: &str) -> Self {
        if path == ":memory:" {
            Self::Memory
        } else {
            Self::Local {
                path: path.to_string(),
            }
        }
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

// Never prints the auth token.
impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { path } => write!(f, "local file {path}"),
            Self::Memory => f.write_str("in-memory database"),
            Self::Remote { url, .. } => write!(f, "remote database {url}"),
        }
    }
}

/// Database handle shared by every repository.
///
/// File and remote backends hand out a fresh connection per operation. An
/// in-memory `SQLite` database only exists inside the connection that created
/// it, so the memory backend keeps one connection and hands out clones.
pub struct SpinDb {
    db: libsql::Database,
    backend: StoreBackend,
    shared: Option<libsql::Connection>,
    remote_timeout: Duration,
}

impl SpinDb {
    /// Open the store on `backend` and bring its schema up to date.
    ///
    /// `remote_timeout` bounds every operation against a remote backend and
    /// is ignored for local ones.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Unavailable` if the backend cannot be opened,
    /// or `DatabaseError::Migration` if the schema cannot be created.
    pub async fn open(
        backend: StoreBackend,
        remote_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let built = match &backend {
            StoreBackend::Local { path } => Builder::new_local(path).build().await,
            StoreBackend::Memory => Builder::new_local(":memory:").build().await,
            StoreBackend::Remote { url, auth_token } => {
                Builder::new_remote(url.clone(), auth_token.clone())
                    .build()
                    .await
            }
        };
        let db = built.map_err(|e| DatabaseError::Unavailable(format!("open {backend}: {e}")))?;

        let mut spin_db = Self {
            db,
            backend,
            shared: None,
            remote_timeout,
        };
        if spin_db.backend == StoreBackend::Memory {
            spin_db.shared = Some(spin_db.connect().await?);
        }

        spin_db.run_migrations().await?;
        info!(backend = %spin_db.backend, "store opened");
        Ok(spin_db)
    }

    /// Open a local database file, or a private in-memory one for `":memory:"`.
    ///
    /// # Errors
    ///
    /// See [`Self::open`].
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open(StoreBackend::local(path), DEFAULT_REMOTE_TIMEOUT).await
    }

    /// Open whichever backend the configuration describes.
    ///
    /// # Errors
    ///
    /// See [`Self::open`].
    pub async fn open_from_config(config: &SpinConfig) -> Result<Self, DatabaseError> {
        Self::open(StoreBackend::from_config(config), config.turso.timeout()).await
    }

    #[must_use]
    pub const fn backend(&self) -> &StoreBackend {
        &self.backend
    }

    /// Acquire a connection for direct queries.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a new connection cannot be established.
    pub async fn connection(&self) -> Result<libsql::Connection, DatabaseError> {
        match &self.shared {
            Some(conn) => Ok(conn.clone()),
            None => self.connect().await,
        }
    }

    /// Run `work` on a connection that is released when `work` finishes.
    ///
    /// Remote backends race the whole operation against the configured
    /// timeout; expiry becomes `DatabaseError::Unavailable`.
    pub(crate) async fn with_connection<T, F, Fut>(
        &self,
        op: &'static str,
        work: F,
    ) -> Result<T, DatabaseError>
    where
        F: FnOnce(libsql::Connection) -> Fut,
        Fut: Future<Output = Result<T, DatabaseError>>,
    {
        let scoped = async {
            let conn = self.connection().await?;
            work(conn).await
        };

        if !self.backend.is_remote() {
            return scoped.await;
        }

        bounded(op, self.remote_timeout, scoped).await
    }

    async fn connect(&self) -> Result<libsql::Connection, DatabaseError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| DatabaseError::Unavailable(format!("connect to {}: {e}", self.backend)))?;

        // Foreign keys are per-connection in SQLite; Turso enforces its own.
        if !self.backend.is_remote() {
            conn.execute("PRAGMA foreign_keys = ON", ())
                .await
                .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
        }
        Ok(conn)
    }
}

/// Race `work` against `limit`; expiry becomes `DatabaseError::Unavailable`.
async fn bounded<T, Fut>(op: &'static str, limit: Duration, work: Fut) -> Result<T, DatabaseError>
where
    Fut: Future<Output = Result<T, DatabaseError>>,
{
    tokio::time::timeout(limit, work).await.unwrap_or_else(|_| {
        warn!(op, timeout = ?limit, "remote store timed out");
        Err(DatabaseError::Unavailable(format!(
            "{op} timed out after {}ms",
            limit.as_millis()
        )))
    })
}
