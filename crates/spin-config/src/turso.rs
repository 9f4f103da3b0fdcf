//! Remote Turso/libSQL configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default per-operation timeout for the remote store, in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TursoConfig {
    /// Database URL (e.g., `libsql://spinner-myorg.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Database auth token.
    #[serde(default)]
    pub auth_token: String,

    /// Upper bound on a single remote operation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TursoConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TursoConfig {
    /// Check if the Turso config has the minimum required fields for remote access.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
