// Domain value objects
pub mod event_type;
pub mod sort_order;

pub use event_type::*;
pub use sort_order::*;
