// Admin dashboard aggregates

use crate::entities::EventLogEntry;
use crate::value_objects::EventType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventTally {
    pub training_completed: u64,
    pub clicks: u64,
    pub reports: u64,
}

impl EventTally {
    pub fn add(&mut self, event_type: EventType, count: u64) {
        match event_type {
            EventType::ViewTraining => self.training_completed += count,
            EventType::ClickedSim => self.clicks += count,
            EventType::Reported => self.reports += count,
        }
    }

    pub fn get(&self, event_type: EventType) -> u64 {
        match event_type {
            EventType::ViewTraining => self.training_completed,
            EventType::ClickedSim => self.clicks,
            EventType::Reported => self.reports,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminSummary {
    pub total_participants: u64,
    pub tally: EventTally,
    /// Newest first.
    pub recent_events: Vec<EventLogEntry>,
}
