use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use backend_domain::{
    format_timestamp, now_micros, parse_timestamp, DbConfig, EventLogEntry, EventLogRepository,
    EventType, NewEvent, NewParticipant, Participant, ParticipantRepository,
    RegistrationOutcome, SortOrder,
};

use crate::repositories::schema;

const EVENT_COLUMNS: &str = "id, participant_email, event_type, metadata, created_at";

#[derive(Clone)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct EventRow {
    id: i64,
    participant_email: Option<String>,
    event_type: String,
    metadata: String,
    created_at: String,
}

impl TryFrom<EventRow> for EventLogEntry {
    type Error = anyhow::Error;

    fn try_from(row: EventRow) -> Result<Self> {
        Ok(EventLogEntry {
            id: row.id,
            participant_email: row.participant_email,
            event_type: EventType::from_str(&row.event_type)?,
            meta: row.metadata,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

impl SqliteRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Private in-memory database. A single connection that never expires,
    /// since each SQLite memory connection is its own database.
    pub async fn connect_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        for statement in schema::ALL {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("schema ensured");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

#[async_trait]
impl ParticipantRepository for SqliteRepo {
    async fn register(&self, participant: &NewParticipant) -> Result<RegistrationOutcome> {
        let created_at = now_micros();
        let mut tx = self.pool.begin().await?;
        let inserted = sqlx::query_scalar::<_, i64>(
            "INSERT INTO participant (email, name, department, created_at) \
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&participant.email)
        .bind(&participant.name)
        .bind(&participant.department)
        .bind(format_timestamp(&created_at))
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(id) => {
                tx.commit().await?;
                Ok(RegistrationOutcome::Registered(Participant {
                    id,
                    email: participant.email.clone(),
                    name: participant.name.clone(),
                    department: participant.department.clone(),
                    created_at,
                }))
            }
            Err(err) if is_unique_violation(&err) => {
                tx.rollback().await?;
                Ok(RegistrationOutcome::DuplicateEmail)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM participant")
            .fetch_one(&self.pool)
            .await?;
        Ok(to_count(count))
    }
}

#[async_trait]
impl EventLogRepository for SqliteRepo {
    async fn append(&self, event: &NewEvent) -> Result<EventLogEntry> {
        let created_at = now_micros();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO event_log (participant_email, event_type, metadata, created_at) \
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&event.participant_email)
        .bind(event.event_type.as_str())
        .bind(&event.meta)
        .bind(format_timestamp(&created_at))
        .fetch_one(&self.pool)
        .await?;
        Ok(EventLogEntry {
            id,
            participant_email: event.participant_email.clone(),
            event_type: event.event_type,
            meta: event.meta.clone(),
            created_at,
        })
    }

    async fn count_by_type(&self, event_type: EventType) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM event_log WHERE event_type = ?")
            .bind(event_type.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(to_count(count))
    }

    async fn count_grouped(&self) -> Result<Vec<(String, u64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT event_type, COUNT(*) FROM event_log GROUP BY event_type ORDER BY event_type",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(event_type, count)| (event_type, to_count(count)))
            .collect())
    }

    async fn list(&self, order: SortOrder, limit: Option<u32>) -> Result<Vec<EventLogEntry>> {
        let direction = order.as_sql();
        let mut query = format!(
            "SELECT {EVENT_COLUMNS} FROM event_log ORDER BY created_at {direction}, id {direction}"
        );
        if limit.is_some() {
            query.push_str(" LIMIT ?");
        }
        let mut statement = sqlx::query_as::<_, EventRow>(&query);
        if let Some(limit) = limit {
            statement = statement.bind(i64::from(limit));
        }
        let rows = statement.fetch_all(&self.pool).await?;
        rows.into_iter().map(EventLogEntry::try_from).collect()
    }

    async fn ping(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqliteRepo {
        let repo = SqliteRepo::connect_in_memory().await.expect("connect");
        repo.ensure_schema().await.expect("schema");
        repo
    }

    fn participant(email: &str) -> NewParticipant {
        NewParticipant {
            email: email.to_string(),
            name: Some("Alice".to_string()),
            department: None,
        }
    }

    #[tokio::test]
    async fn fresh_email_increments_count_by_one() {
        let repo = repo().await;
        let before = repo.count().await.unwrap();
        let outcome = repo.register(&participant("alice@x.com")).await.unwrap();
        match outcome {
            RegistrationOutcome::Registered(row) => {
                assert_eq!(row.email, "alice@x.com");
                assert_eq!(row.name.as_deref(), Some("Alice"));
                assert!(row.id > 0);
            }
            RegistrationOutcome::DuplicateEmail => panic!("unexpected duplicate"),
        }
        assert_eq!(repo.count().await.unwrap(), before + 1);
    }

    #[tokio::test]
    async fn duplicate_email_rolls_back_and_keeps_prior_rows() {
        let repo = repo().await;
        repo.register(&participant("alice@x.com")).await.unwrap();
        repo.register(&participant("bob@x.com")).await.unwrap();
        let second = repo.register(&participant("alice@x.com")).await.unwrap();
        assert_eq!(second, RegistrationOutcome::DuplicateEmail);
        assert_eq!(repo.count().await.unwrap(), 2);

        // The connection is usable after the rollback.
        let third = repo.register(&participant("carol@x.com")).await.unwrap();
        assert!(matches!(third, RegistrationOutcome::Registered(_)));
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    /// File-backed store so the pool holds several connections that really
    /// contend for the write lock.
    async fn file_repo(dir: &tempfile::TempDir) -> SqliteRepo {
        let path = dir.path().join("phish_train.db");
        let config = DbConfig {
            database_url: format!("sqlite://{}", path.display()),
        };
        let repo = SqliteRepo::connect(&config).await.expect("connect");
        repo.ensure_schema().await.expect("schema");
        repo
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn simultaneous_registrations_admit_exactly_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = file_repo(&dir).await;
        assert!(repo.pool().options().get_max_connections() > 1);

        let contenders: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    let candidate = participant("dup@x.com");
                    repo.register(&candidate).await
                })
            })
            .collect();
        let mut outcomes = Vec::new();
        for handle in contenders {
            outcomes.push(handle.await.expect("join").expect("register"));
        }

        let registered = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RegistrationOutcome::Registered(_)))
            .count();
        assert_eq!(registered, 1);
        assert_eq!(
            outcomes
                .iter()
                .filter(|outcome| **outcome == RegistrationOutcome::DuplicateEmail)
                .count(),
            7
        );
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn appending_clicks_leaves_other_counts_alone() {
        let repo = repo().await;
        repo.append(&NewEvent::reported(None, None)).await.unwrap();
        let reports_before = repo.count_by_type(EventType::Reported).await.unwrap();
        let training_before = repo.count_by_type(EventType::ViewTraining).await.unwrap();
        let clicks_before = repo.count_by_type(EventType::ClickedSim).await.unwrap();

        for n in 0..5 {
            repo.append(&NewEvent::simulated_click(None, &format!("t{n}")))
                .await
                .unwrap();
        }

        assert_eq!(repo.count_by_type(EventType::ClickedSim).await.unwrap(), clicks_before + 5);
        assert_eq!(repo.count_by_type(EventType::Reported).await.unwrap(), reports_before);
        assert_eq!(repo.count_by_type(EventType::ViewTraining).await.unwrap(), training_before);
    }

    #[tokio::test]
    async fn append_round_trips_through_list() {
        let repo = repo().await;
        let written = repo
            .append(&NewEvent::simulated_click(Some("bob@x.com".to_string()), "abc123"))
            .await
            .unwrap();
        let listed = repo.list(SortOrder::Ascending, None).await.unwrap();
        assert_eq!(listed, vec![written]);
    }

    #[tokio::test]
    async fn list_orders_and_limits() {
        let repo = repo().await;
        for token in ["a", "b", "c"] {
            repo.append(&NewEvent::simulated_click(None, token)).await.unwrap();
        }
        let ascending = repo.list(SortOrder::Ascending, None).await.unwrap();
        let ids: Vec<i64> = ascending.iter().map(|event| event.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(ascending.windows(2).all(|pair| pair[0].created_at <= pair[1].created_at));
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

        let newest = repo.list(SortOrder::Descending, Some(2)).await.unwrap();
        assert_eq!(newest.len(), 2);
        assert_eq!(newest[0].meta, "token=c");
        assert_eq!(newest[1].meta, "token=b");
    }

    #[tokio::test]
    async fn grouped_counts_expose_unknown_types() {
        let repo = repo().await;
        repo.append(&NewEvent::training_completed(None)).await.unwrap();
        sqlx::query(
            "INSERT INTO event_log (participant_email, event_type, metadata, created_at) \
             VALUES (NULL, 'opened_mail', '', '2026-01-01T00:00:00.000000Z')",
        )
        .execute(repo.pool())
        .await
        .unwrap();

        let grouped = repo.count_grouped().await.unwrap();
        assert!(grouped.contains(&("opened_mail".to_string(), 1)));
        assert!(grouped.contains(&("view_training".to_string(), 1)));

        let err = repo.list(SortOrder::Ascending, None).await.expect_err("unknown type");
        assert!(err.to_string().contains("opened_mail"));
    }

    #[tokio::test]
    async fn ping_answers() {
        let repo = repo().await;
        repo.ping().await.expect("ping");
    }
}
