//! Request handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::InterfaceError;
use crate::state::AppState;

/// GET /maps/route/{id}/state
pub async fn route_state(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<String, InterfaceError> {
    Ok(state.get_state_text(&id)?)
}

/// GET /maps/route/{id}/lastStateUpdateDateTime
pub async fn route_last_updated(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, InterfaceError> {
    Ok(match state.get_last_updated(&id)? {
        Some(updated_at) => (StatusCode::OK, updated_at.to_rfc3339()).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// GET /maps/route/{id}
pub async fn route_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, InterfaceError> {
    Ok(Json(state.get_route_record(&id)?))
}

/// GET|POST /maps/route/{id}/state/update
///
/// Returns as soon as the poll is started.
pub async fn route_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<&'static str, InterfaceError> {
    state.trigger_poll(&id)?;
    Ok("OK")
}

/// GET /maps/running/cronjobs
pub async fn running_cronjobs(State(state): State<Arc<AppState>>) -> String {
    state.running_job_descriptions().join(", ")
}

/// GET /maps/running/jobs
pub async fn running_jobs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let jobs = state.job_summaries();
    Json(serde_json::json!({
        "count": jobs.len(),
        "jobs": jobs,
    }))
}

/// Liveness probe.
pub async fn liveness_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive"
    }))
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
