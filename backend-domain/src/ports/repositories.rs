use async_trait::async_trait;

use crate::entities::{EventLogEntry, NewEvent, NewParticipant, RegistrationOutcome};
use crate::value_objects::{EventType, SortOrder};

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Inserts in a transaction. A duplicate email rolls back and reports
    /// `RegistrationOutcome::DuplicateEmail` rather than an error.
    async fn register(&self, participant: &NewParticipant) -> anyhow::Result<RegistrationOutcome>;
    async fn count(&self) -> anyhow::Result<u64>;
}

#[async_trait]
pub trait EventLogRepository: Send + Sync {
    async fn append(&self, event: &NewEvent) -> anyhow::Result<EventLogEntry>;
    async fn count_by_type(&self, event_type: EventType) -> anyhow::Result<u64>;
    /// Row counts grouped by the stored `event_type` string, unparsed.
    async fn count_grouped(&self) -> anyhow::Result<Vec<(String, u64)>>;
    async fn list(&self, order: SortOrder, limit: Option<u32>) -> anyhow::Result<Vec<EventLogEntry>>;
    async fn ping(&self) -> anyhow::Result<()>;
}
