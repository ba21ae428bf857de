use anyhow::{Context, Result};
use raed_application::DiagnosisSession;
use raed_core::config::RaedConfig;
use raed_core::state::KeyValueStore;
use raed_infrastructure::config_service::resolve_data_dir;
use raed_infrastructure::{ConfigLoader, JsonFileStore, MemoryStore};
use raed_interaction::HttpDiagnosisService;
use std::path::Path;
use std::sync::Arc;

/// Everything a command needs: the loaded config and a wired session.
pub struct AppContext {
    pub config: RaedConfig,
    pub session: DiagnosisSession,
}

impl AppContext {
    pub fn build(config_path: Option<&Path>, offline: bool) -> Result<Self> {
        let loader = match config_path {
            Some(path) => ConfigLoader::with_path(path),
            None => ConfigLoader::new(),
        };
        let config = loader.load().context("Failed to load configuration")?;

        let store: Arc<dyn KeyValueStore> = if offline {
            Arc::new(MemoryStore::new())
        } else {
            let dir = resolve_data_dir(&config).context("Failed to resolve data directory")?;
            tracing::debug!("Using data directory {}", dir.display());
            Arc::new(JsonFileStore::new(dir))
        };
        let service = Arc::new(HttpDiagnosisService::from_config(&config));
        let session = DiagnosisSession::new(store, service, &config);

        Ok(Self { config, session })
    }
}
