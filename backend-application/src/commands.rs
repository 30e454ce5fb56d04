pub mod event_commands;
pub mod participant_commands;
