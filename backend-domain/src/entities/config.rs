// Runtime configuration handed to the application layer

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub session_secret: String,
    pub max_body_bytes: u64,
    pub recent_events_limit: u32,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
}
