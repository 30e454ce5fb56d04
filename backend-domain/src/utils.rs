use anyhow::{anyhow, Result};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Current UTC time at the precision timestamps are stored and exported with.
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width ISO-8601, e.g. `2026-03-01T09:30:00.000042Z`. Lexical order of
/// the output matches chronological order.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|value| value.with_timezone(&Utc))
        .map_err(|err| anyhow!("invalid timestamp '{}': {}", raw, err))
}
