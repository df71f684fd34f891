//! HTTP route definitions.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Create the router.
///
/// ```text
/// /maps/route/{id}
///   GET        /maps/route/{id}                          - Route record
///   GET        /maps/route/{id}/state                    - Labelled state text
///   GET        /maps/route/{id}/lastStateUpdateDateTime  - Last update time
///   GET|POST   /maps/route/{id}/state/update             - Poll now
///
/// /maps/running
///   GET        /maps/running/cronjobs                    - Job descriptions
///   GET        /maps/running/jobs                        - Job details
///
/// /livez  - Liveness probe
/// ```
///
/// Trailing slashes are not matched here; serve [`create_app`] to accept
/// them.
pub fn create_router(state: Arc<AppState>) -> Router {
    let route_routes = Router::new()
        .route("/{id}", get(handlers::route_record))
        .route("/{id}/state", get(handlers::route_state))
        .route(
            "/{id}/lastStateUpdateDateTime",
            get(handlers::route_last_updated),
        )
        .route(
            "/{id}/state/update",
            get(handlers::route_update).post(handlers::route_update),
        );

    let running_routes = Router::new()
        .route("/cronjobs", get(handlers::running_cronjobs))
        .route("/jobs", get(handlers::running_jobs));

    // Liveness probe has no state dependency
    let liveness_route = Router::new().route("/livez", get(handlers::liveness_probe));

    Router::new()
        .nest("/maps/route", route_routes)
        .nest("/maps/running", running_routes)
        .with_state(state)
        .merge(liveness_route)
        .layer(TraceLayer::new_for_http())
}

/// The router with trailing slashes trimmed before routing, so
/// `/maps/route/{id}/state/` and `/maps/route/{id}/state` are the same
/// endpoint.
pub fn create_app(state: Arc<AppState>) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(create_router(state))
}
