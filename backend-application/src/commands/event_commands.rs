use tracing::{debug, error};

use crate::{AppError, AppState};
use backend_domain::{non_blank, EventLogEntry, NewEvent};

pub async fn record_training_completion(
    state: &AppState,
    email: Option<String>,
) -> Result<EventLogEntry, AppError> {
    append(state, NewEvent::training_completed(non_blank(email))).await
}

pub async fn record_report(
    state: &AppState,
    email: Option<String>,
    details: Option<String>,
) -> Result<EventLogEntry, AppError> {
    let details = details.filter(|value| !value.is_empty());
    append(state, NewEvent::reported(non_blank(email), details)).await
}

/// Unregistered emails and anonymous clicks are recorded as-is; a forwarded
/// link is still a click.
pub async fn record_simulated_click(
    state: &AppState,
    token: &str,
    email: Option<String>,
) -> Result<EventLogEntry, AppError> {
    append(state, NewEvent::simulated_click(non_blank(email), token)).await
}

async fn append(state: &AppState, event: NewEvent) -> Result<EventLogEntry, AppError> {
    let entry = state.event_repo.append(&event).await.map_err(|err| {
        error!("failed to append {} event: {}", event.event_type, err);
        AppError::Internal(err)
    })?;
    debug!(
        id = entry.id,
        event_type = %entry.event_type,
        participant = entry.participant_email.as_deref().unwrap_or("<none>"),
        "event appended"
    );
    Ok(entry)
}
