//! Table definitions for the participant registry and the event log.
//!
//! There is no migration system; `ensure_schema` is run once by an operator
//! through the `init-db` command.

pub const CREATE_PARTICIPANT: &str = r#"
CREATE TABLE IF NOT EXISTS participant (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email VARCHAR(256) NOT NULL UNIQUE,
    name VARCHAR(128),
    department VARCHAR(128),
    created_at TEXT NOT NULL
)
"#;

/// `participant_email` is deliberately not a foreign key: anonymous and
/// unregistered interactions are recorded too.
pub const CREATE_EVENT_LOG: &str = r#"
CREATE TABLE IF NOT EXISTS event_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    participant_email VARCHAR(256),
    event_type VARCHAR(64) NOT NULL,
    metadata VARCHAR(512) NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
)
"#;

pub const CREATE_EVENT_LOG_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_event_log_created_at ON event_log (created_at, id)";

pub const CREATE_EVENT_LOG_TYPE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_event_log_event_type ON event_log (event_type)";

pub const ALL: [&str; 4] = [
    CREATE_PARTICIPANT,
    CREATE_EVENT_LOG,
    CREATE_EVENT_LOG_CREATED_AT_INDEX,
    CREATE_EVENT_LOG_TYPE_INDEX,
];
