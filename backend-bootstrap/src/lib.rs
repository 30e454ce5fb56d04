pub mod context;
pub mod lifecycle;
pub mod logging;

pub use lifecycle::{init_database, run_standalone};
