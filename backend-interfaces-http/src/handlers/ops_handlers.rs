use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use backend_application::queries::health_queries;
use backend_application::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

pub async fn health_live() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

pub async fn health_ready(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    if health_queries::store_ready(&state).await {
        (StatusCode::OK, Json(HealthStatus { status: "ready" }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthStatus { status: "unavailable" }),
        )
    }
}
