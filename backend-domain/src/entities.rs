// Domain entities
pub mod config;
pub mod event;
pub mod participant;
pub mod summary;

pub use config::*;
pub use event::*;
pub use participant::*;
pub use summary::*;
