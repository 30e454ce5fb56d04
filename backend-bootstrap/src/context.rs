use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use backend_application::AppState;
use backend_infrastructure::{AppConfig, SqliteRepo};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();
        let db_config = config.to_db_config();
        info!(
            bind_addr = %runtime_config.bind_addr,
            database_url = %db_config.database_url,
            recent_events_limit = runtime_config.recent_events_limit,
            "config loaded"
        );
        match &config.source {
            Some(path) => info!(path = %path, "config file read"),
            None => warn!("config file not found, using defaults and environment"),
        }
        if config.uses_default_secret() {
            warn!("PHISHTRACK_SESSION_SECRET not set, using the development default");
        }

        let repo = SqliteRepo::connect(&db_config).await?;
        let state = AppState {
            config: runtime_config,
            participant_repo: Arc::new(repo.clone()),
            event_repo: Arc::new(repo),
        };
        Ok(Self { state })
    }
}
