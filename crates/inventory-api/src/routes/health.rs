use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    uptime_secs: i64,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_secs = (chrono::Utc::now() - state.started_at).num_seconds();
    Json(HealthResponse {
        status: "ok",
        uptime_secs,
    })
}
