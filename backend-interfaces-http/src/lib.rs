pub mod csv_export;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod views;

pub use error::*;
pub use handlers::*;
pub use middleware::*;
pub use routes::*;
