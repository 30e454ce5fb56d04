pub mod action_handlers;
pub mod admin_handlers;
pub mod ops_handlers;
pub mod page_handlers;

pub use action_handlers::*;
pub use admin_handlers::*;
pub use ops_handlers::*;
pub use page_handlers::*;
