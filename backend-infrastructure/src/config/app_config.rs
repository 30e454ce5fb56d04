use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;

use backend_domain::{DbConfig, RuntimeConfig};

pub const DEFAULT_SESSION_SECRET: &str = "dev-secret";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub session_secret: String,
    pub max_body_bytes: u64,
    pub recent_events_limit: u32,
    pub log_format: LogFormat,
    /// File the values were read from; `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            database_url: "sqlite://phish_train.db".to_string(),
            session_secret: DEFAULT_SESSION_SECRET.to_string(),
            max_body_bytes: 64 * 1024,
            recent_events_limit: 200,
            log_format: LogFormat::Text,
            source: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("PHISHTRACK_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            let mut config = Self::from_toml(&content)?;
            config.source = Some(path);
            config
        } else {
            AppConfig::default()
        };
        config.apply_env_overrides()?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    pub fn normalize(&mut self) {
        self.bind_addr = self.bind_addr.trim().to_string();
        self.database_url = self.database_url.trim().to_string();
        if self.session_secret.trim().is_empty() {
            self.session_secret = DEFAULT_SESSION_SECRET.to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.database_url.is_empty() {
            return Err(anyhow!("database_url must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.recent_events_limit == 0 {
            return Err(anyhow!("recent_events_limit must be greater than 0"));
        }
        Ok(())
    }

    pub fn uses_default_secret(&self) -> bool {
        self.session_secret == DEFAULT_SESSION_SECRET
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            session_secret: self.session_secret.clone(),
            max_body_bytes: self.max_body_bytes,
            recent_events_limit: self.recent_events_limit,
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            database_url: self.database_url.clone(),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup("PHISHTRACK_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("PHISHTRACK_DATABASE_URL") {
            self.database_url = value;
        }
        if let Some(value) = lookup("PHISHTRACK_SESSION_SECRET") {
            self.session_secret = value;
        }
        if let Some(value) = lookup("PHISHTRACK_MAX_BODY_BYTES") {
            self.max_body_bytes = value
                .trim()
                .parse()
                .map_err(|err| anyhow!("invalid PHISHTRACK_MAX_BODY_BYTES '{}': {}", value, err))?;
        }
        if let Some(value) = lookup("PHISHTRACK_RECENT_EVENTS_LIMIT") {
            self.recent_events_limit = value.trim().parse().map_err(|err| {
                anyhow!("invalid PHISHTRACK_RECENT_EVENTS_LIMIT '{}': {}", value, err)
            })?;
        }
        if let Some(value) = lookup("PHISHTRACK_LOG_FORMAT") {
            match value.trim().to_lowercase().as_str() {
                "json" => self.log_format = LogFormat::Json,
                "text" => self.log_format = LogFormat::Text,
                other => return Err(anyhow!("unknown PHISHTRACK_LOG_FORMAT '{}'", other)),
            }
        }
        Ok(())
    }
}
