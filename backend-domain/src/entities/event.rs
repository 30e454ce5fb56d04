// Event log entity
// One row per participant interaction; never updated or deleted

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::EventType;

/// Stored in place of the email for reports submitted without one.
pub const ANONYMOUS_REPORTER: &str = "anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: i64,
    pub participant_email: Option<String>,
    pub event_type: EventType,
    pub meta: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub participant_email: Option<String>,
    pub event_type: EventType,
    pub meta: String,
}

impl NewEvent {
    pub fn training_completed(email: Option<String>) -> Self {
        Self {
            participant_email: email,
            event_type: EventType::ViewTraining,
            meta: "completed_quiz".to_string(),
        }
    }

    pub fn simulated_click(email: Option<String>, token: &str) -> Self {
        Self {
            participant_email: email,
            event_type: EventType::ClickedSim,
            meta: format!("token={}", token),
        }
    }

    pub fn reported(email: Option<String>, details: Option<String>) -> Self {
        Self {
            participant_email: Some(email.unwrap_or_else(|| ANONYMOUS_REPORTER.to_string())),
            event_type: EventType::Reported,
            meta: details.unwrap_or_default(),
        }
    }
}
