use anyhow::Context;
use spin_config::SpinConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (`.env`, TOML files, `SPINNER_*` env) and apply
/// command-line overrides on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SpinConfig> {
    let mut config =
        SpinConfig::load_with_dotenv().context("failed to load task spinner configuration")?;
    apply_flag_overrides(&mut config, flags);
    config
        .validate()
        .context("invalid configuration after applying command-line flags")?;
    Ok(config)
}

/// `--database` pins the store to a local file, even when a remote store is
/// configured.
fn apply_flag_overrides(config: &mut SpinConfig, flags: &GlobalFlags) {
    if let Some(path) = &flags.database {
        if config.turso.is_configured() {
            tracing::debug!(path, "--database given; ignoring configured remote store");
        }
        config.database.path.clone_from(path);
        config.turso.url.clear();
        config.turso.auth_token.clear();
    }
}
