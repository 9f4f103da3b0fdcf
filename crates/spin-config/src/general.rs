//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default number of history rows returned by `spin history`.
const fn default_history_limit() -> u32 {
    100
}

/// Default analytics window in days.
const fn default_analytics_days() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default row cap for history listings.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,

    /// Default window for analytics extracts, in days.
    #[serde(default = "default_analytics_days")]
    pub analytics_days: u32,

    /// Override for the number of history rows reports scan. When unset each
    /// report kind uses its own cap.
    #[serde(default)]
    pub report_history_limit: Option<u32>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            analytics_days: default_analytics_days(),
            report_history_limit: None,
        }
    }
}
