pub mod web;

pub use web::*;
