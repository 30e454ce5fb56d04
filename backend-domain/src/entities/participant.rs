// Participant entity
// A person enrolled in the awareness programme, keyed by email

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParticipant {
    pub email: String,
    pub name: Option<String>,
    pub department: Option<String>,
}

impl NewParticipant {
    /// Trims every field and drops blank optionals. Returns `None` when the
    /// email is missing or blank.
    pub fn normalized(
        email: Option<String>,
        name: Option<String>,
        department: Option<String>,
    ) -> Option<Self> {
        let email = non_blank(email)?;
        Some(Self {
            email,
            name: non_blank(name),
            department: non_blank(department),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered(Participant),
    DuplicateEmail,
}

pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
