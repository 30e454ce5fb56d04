pub mod config;
pub mod repositories;

pub use config::*;
pub use repositories::*;
