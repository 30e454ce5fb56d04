use axum::routing::{get, post};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{action_handlers, admin_handlers, ops_handlers, page_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page_handlers::index))
        .route("/training", get(page_handlers::training))
        .route(
            "/training/complete",
            post(action_handlers::training_complete),
        )
        .route(
            "/report",
            get(page_handlers::report_form).post(action_handlers::submit_report),
        )
        .route(
            "/simulated-link/:token",
            get(action_handlers::simulated_link),
        )
        .route("/admin", get(admin_handlers::admin_dashboard))
        .route("/admin/export", get(admin_handlers::export_events))
        .route(
            "/admin/add_participant",
            post(admin_handlers::add_participant),
        )
        .route("/ops/health/live", get(ops_handlers::health_live))
        .route("/ops/health/ready", get(ops_handlers::health_ready))
        .with_state(state)
}
