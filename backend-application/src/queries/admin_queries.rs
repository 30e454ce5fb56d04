use tracing::error;

use crate::{AppError, AppState};
use backend_domain::{AdminSummary, EventTally, EventType, SortOrder};

pub async fn load_summary(state: &AppState) -> Result<AdminSummary, AppError> {
    let total_participants = state.participant_repo.count().await.map_err(|err| {
        error!("failed to count participants: {}", err);
        AppError::Internal(err)
    })?;
    let tally = load_tally(state).await?;
    let recent_events = state
        .event_repo
        .list(SortOrder::Descending, Some(state.config.recent_events_limit))
        .await
        .map_err(|err| {
            error!("failed to list recent events: {}", err);
            AppError::Internal(err)
        })?;
    Ok(AdminSummary {
        total_participants,
        tally,
        recent_events,
    })
}

/// Fails on any stored type outside `EventType` instead of leaving it out of
/// the counts.
pub async fn load_tally(state: &AppState) -> Result<EventTally, AppError> {
    let grouped = state.event_repo.count_grouped().await.map_err(|err| {
        error!("failed to count events: {}", err);
        AppError::Internal(err)
    })?;
    let mut tally = EventTally::default();
    for (raw, count) in grouped {
        let event_type: EventType = raw.parse().map_err(|err| {
            error!("event log holds {}", err);
            AppError::Internal(anyhow::Error::new(err))
        })?;
        tally.add(event_type, count);
    }
    Ok(tally)
}
