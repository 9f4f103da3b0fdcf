use anyhow::Context;
use spin_config::SpinConfig;
use spin_db::StoreBackend;
use spin_db::service::SpinService;

/// Shared application resources initialized once at startup and handed to
/// every command handler.
pub struct AppContext {
    pub service: SpinService,
    pub config: SpinConfig,
}

impl AppContext {
    /// Open the store the configuration points at.
    pub async fn init(config: SpinConfig) -> anyhow::Result<Self> {
        let backend = StoreBackend::from_config(&config);
        tracing::debug!(%backend, "opening task store");

        let service = SpinService::from_config(&config)
            .await
            .with_context(|| format!("failed to open task store ({backend})"))?;

        Ok(Self { service, config })
    }

    /// A context over a private in-memory store with default configuration.
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        let mut config = SpinConfig::default();
        config.database.path = ":memory:".into();
        Self::init(config).await.expect("in-memory store should open")
    }
}
