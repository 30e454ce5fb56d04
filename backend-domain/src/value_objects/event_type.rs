// Event type value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Participant finished the training quiz.
    ViewTraining,
    /// Participant followed a simulated phishing link.
    ClickedSim,
    /// Participant reported a suspicious message.
    Reported,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized event_type '{0}'")]
pub struct UnknownEventType(pub String);

impl EventType {
    pub const ALL: [EventType; 3] = [
        EventType::ViewTraining,
        EventType::ClickedSim,
        EventType::Reported,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::ViewTraining => "view_training",
            EventType::ClickedSim => "clicked_sim",
            EventType::Reported => "reported",
        }
    }
}

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view_training" => Ok(EventType::ViewTraining),
            "clicked_sim" => Ok(EventType::ClickedSim),
            "reported" => Ok(EventType::Reported),
            other => Err(UnknownEventType(other.to_string())),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_stored_name() {
        for event_type in EventType::ALL {
            let parsed: EventType = event_type.as_str().parse().expect("known type");
            assert_eq!(parsed, event_type);
        }
    }

    #[test]
    fn rejects_unknown_names_with_the_offending_value() {
        let err = "opened_mail".parse::<EventType>().expect_err("unknown type");
        assert_eq!(err, UnknownEventType("opened_mail".to_string()));
        assert_eq!(err.to_string(), "unrecognized event_type 'opened_mail'");
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Reported".parse::<EventType>().is_err());
    }
}
