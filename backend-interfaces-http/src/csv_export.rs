use csv::{Terminator, WriterBuilder};

use backend_domain::{format_timestamp, EventLogEntry};

pub const EXPORT_FILENAME: &str = "phish_training_events.csv";
pub const HEADER: [&str; 5] = ["id", "participant_email", "event_type", "metadata", "created_at"];

/// Renders events as RFC 4180 CSV (CRLF line endings), one row per event in
/// the order given.
pub fn render_events(events: &[EventLogEntry]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::with_capacity(64 * (events.len() + 1)));
    writer.write_record(HEADER)?;
    for event in events {
        writer.write_record([
            event.id.to_string().as_str(),
            event.participant_email.as_deref().unwrap_or(""),
            event.event_type.as_str(),
            event.meta.as_str(),
            format_timestamp(&event.created_at).as_str(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}
