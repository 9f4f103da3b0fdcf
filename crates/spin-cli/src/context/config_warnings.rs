use spin_config::SpinConfig;

/// Emit warnings for remote-store settings that were given but will not be used.
pub fn warn_unconfigured(config: &SpinConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &SpinConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let turso = &config.turso;

    let mut warnings = Vec::new();

    if turso.is_configured() {
        return warnings;
    }

    if turso.url.is_empty() != turso.auth_token.is_empty() {
        warnings.push(
            "Remote store needs both turso.url and turso.auth_token; using the local database."
                .to_string(),
        );
    } else if env_keys.iter().any(|key| key.starts_with("SPINNER_TURSO")) {
        warnings.push(
            "Turso config appears default while SPINNER_TURSO* env vars exist. Use double underscores (example: SPINNER_TURSO__URL)."
                .to_string(),
        );
    }

    warnings
}
