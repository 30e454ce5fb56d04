use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;

use crate::AppState;
use backend_domain::{
    now_micros, EventLogEntry, EventLogRepository, EventType, NewEvent, NewParticipant,
    Participant, ParticipantRepository, RegistrationOutcome, RuntimeConfig, SortOrder,
};

#[derive(Default)]
struct Inner {
    participants: Vec<Participant>,
    events: Vec<EventLogEntry>,
    raw_types: Vec<String>,
    fail_writes: bool,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn events(&self) -> Vec<EventLogEntry> {
        self.inner.lock().unwrap().events.clone()
    }

    pub fn fail_writes(&self) {
        self.inner.lock().unwrap().fail_writes = true;
    }

    pub fn insert_raw_type(&self, event_type: &str) {
        self.inner.lock().unwrap().raw_types.push(event_type.to_string());
    }
}

pub fn memory_state() -> (AppState, MemoryStore) {
    let store = MemoryStore::default();
    let state = AppState {
        config: RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            session_secret: "test-secret".to_string(),
            max_body_bytes: 64 * 1024,
            recent_events_limit: 200,
        },
        participant_repo: Arc::new(store.clone()),
        event_repo: Arc::new(store.clone()),
    };
    (state, store)
}

#[async_trait]
impl ParticipantRepository for MemoryStore {
    async fn register(&self, participant: &NewParticipant) -> anyhow::Result<RegistrationOutcome> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(anyhow!("store unavailable"));
        }
        if inner.participants.iter().any(|row| row.email == participant.email) {
            return Ok(RegistrationOutcome::DuplicateEmail);
        }
        let row = Participant {
            id: inner.participants.len() as i64 + 1,
            email: participant.email.clone(),
            name: participant.name.clone(),
            department: participant.department.clone(),
            created_at: now_micros(),
        };
        inner.participants.push(row.clone());
        Ok(RegistrationOutcome::Registered(row))
    }

    async fn count(&self) -> anyhow::Result<u64> {
        Ok(self.inner.lock().unwrap().participants.len() as u64)
    }
}

#[async_trait]
impl EventLogRepository for MemoryStore {
    async fn append(&self, event: &NewEvent) -> anyhow::Result<EventLogEntry> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(anyhow!("store unavailable"));
        }
        let entry = EventLogEntry {
            id: inner.events.len() as i64 + 1,
            participant_email: event.participant_email.clone(),
            event_type: event.event_type,
            meta: event.meta.clone(),
            created_at: now_micros(),
        };
        inner.events.push(entry.clone());
        Ok(entry)
    }

    async fn count_by_type(&self, event_type: EventType) -> anyhow::Result<u64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .events
            .iter()
            .filter(|event| event.event_type == event_type)
            .count() as u64)
    }

    async fn count_grouped(&self) -> anyhow::Result<Vec<(String, u64)>> {
        let inner = self.inner.lock().unwrap();
        let mut grouped: Vec<(String, u64)> = Vec::new();
        let names = inner
            .events
            .iter()
            .map(|event| event.event_type.as_str().to_string())
            .chain(inner.raw_types.iter().cloned());
        for name in names {
            match grouped.iter_mut().find(|(existing, _)| *existing == name) {
                Some((_, count)) => *count += 1,
                None => grouped.push((name, 1)),
            }
        }
        Ok(grouped)
    }

    async fn list(&self, order: SortOrder, limit: Option<u32>) -> anyhow::Result<Vec<EventLogEntry>> {
        let mut events = self.inner.lock().unwrap().events.clone();
        if order == SortOrder::Descending {
            events.reverse();
        }
        if let Some(limit) = limit {
            events.truncate(limit as usize);
        }
        Ok(events)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
