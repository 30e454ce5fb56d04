pub mod admin_queries;
pub mod export_queries;
pub mod health_queries;
