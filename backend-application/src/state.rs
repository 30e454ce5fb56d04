use std::sync::Arc;

use backend_domain::ports::{EventLogRepository, ParticipantRepository};
use backend_domain::RuntimeConfig;

/// Store handles are passed to every command and query through this value;
/// nothing here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub participant_repo: Arc<dyn ParticipantRepository>,
    pub event_repo: Arc<dyn EventLogRepository>,
}
