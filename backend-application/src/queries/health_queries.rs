use tracing::warn;

use crate::AppState;

pub async fn store_ready(state: &AppState) -> bool {
    match state.event_repo.ping().await {
        Ok(()) => true,
        Err(err) => {
            warn!("store ping failed: {}", err);
            false
        }
    }
}
