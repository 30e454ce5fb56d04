use tracing::{error, info, warn};

use crate::{AppError, AppState};
use backend_domain::{NewParticipant, RegistrationOutcome};

/// Returns `Ok(None)` when no email was supplied; nothing is written in that
/// case and the caller shows no notice.
pub async fn add_participant(
    state: &AppState,
    email: Option<String>,
    name: Option<String>,
    department: Option<String>,
) -> Result<Option<RegistrationOutcome>, AppError> {
    let Some(participant) = NewParticipant::normalized(email, name, department) else {
        return Ok(None);
    };
    let outcome = state
        .participant_repo
        .register(&participant)
        .await
        .map_err(|err| {
            error!("failed to register participant: {}", err);
            AppError::Internal(err)
        })?;
    match &outcome {
        RegistrationOutcome::Registered(row) => {
            info!(id = row.id, email = %row.email, "participant registered");
        }
        RegistrationOutcome::DuplicateEmail => {
            warn!(email = %participant.email, "participant already registered");
        }
    }
    Ok(Some(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_state;

    #[tokio::test]
    async fn fresh_email_registers() {
        let (state, _store) = memory_state();
        let outcome = add_participant(
            &state,
            Some("alice@x.com".to_string()),
            Some("Alice".to_string()),
            Some("Finance".to_string()),
        )
        .await
        .expect("register");
        assert!(matches!(outcome, Some(RegistrationOutcome::Registered(_))));
        assert_eq!(state.participant_repo.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_an_outcome_not_an_error() {
        let (state, _store) = memory_state();
        add_participant(&state, Some("alice@x.com".to_string()), None, None)
            .await
            .expect("first");
        let second = add_participant(&state, Some("alice@x.com".to_string()), None, None)
            .await
            .expect("second");
        assert_eq!(second, Some(RegistrationOutcome::DuplicateEmail));
        assert_eq!(state.participant_repo.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn blank_email_writes_nothing() {
        let (state, _store) = memory_state();
        let outcome = add_participant(&state, Some(" ".to_string()), Some("Nobody".to_string()), None)
            .await
            .expect("ignored");
        assert_eq!(outcome, None);
        assert_eq!(state.participant_repo.count().await.expect("count"), 0);
    }
}
