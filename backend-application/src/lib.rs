// Backend Application Layer

pub mod commands;
pub mod error;
pub mod queries;
pub mod state;

#[cfg(test)]
mod testing;

pub use error::AppError;
pub use state::AppState;
