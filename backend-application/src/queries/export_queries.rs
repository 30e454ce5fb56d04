use tracing::error;

use crate::{AppError, AppState};
use backend_domain::{EventLogEntry, SortOrder};

/// Every event, oldest first.
pub async fn list_all_events(state: &AppState) -> Result<Vec<EventLogEntry>, AppError> {
    state
        .event_repo
        .list(SortOrder::Ascending, None)
        .await
        .map_err(|err| {
            error!("failed to list events for export: {}", err);
            AppError::Internal(err)
        })
}
