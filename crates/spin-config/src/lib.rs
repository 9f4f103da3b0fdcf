//! # spin-config
//!
//! Layered configuration loading for the task spinner using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SPINNER_*` prefix, `__` as separator)
//! 2. Project-level `.spinner/config.toml`
//! 3. User-level `~/.config/spinner/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SPINNER_TURSO__URL` -> `turso.url`,
//! `SPINNER_DATABASE__PATH` -> `database.path`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use spin_config::SpinConfig;
//!
//! let config = SpinConfig::load_with_dotenv().expect("config");
//!
//! if config.turso.is_configured() {
//!     println!("Remote store: {}", config.turso.url);
//! } else {
//!     println!("Local store: {}", config.database.path);
//! }
//! ```

mod database;
mod error;
mod general;
mod turso;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use turso::TursoConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".spinner/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SpinConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub turso: TursoConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SpinConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (if present) before building
    /// the figment. This is the typical entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value fails validation.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SPINNER_").split("__"))
    }

    /// Reject values no store could run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.turso.is_configured() && self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty when no remote store is configured".into(),
            });
        }
        if self.turso.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "turso.timeout_secs".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.general.history_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.history_limit".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("spinner").join("config.toml"))
    }
}
