//! Local database configuration.

use serde::{Deserialize, Serialize};

/// Default database file, relative to the working directory.
fn default_path() -> String {
    "task_spinner.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the local libSQL database file. `:memory:` keeps everything
    /// in memory for the lifetime of the process.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
