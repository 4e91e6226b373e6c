//! Readiness and metrics endpoints.
//!
//! Liveness (`/health`) is the shared handler from the web crate; readiness
//! checks both stores.

use crate::state::AppState;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use eventtracker_web::handlers::ReadinessReport;

/// Readiness check endpoint.
///
/// Returns 200 when both stores answer a ping, 503 otherwise.
///
/// # Example
///
/// ```bash
/// curl http://localhost:5000/ready
/// # {"events_store":"up","ready":true,"users_store":"up"}
/// ```
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessReport>) {
    let (users, events) = tokio::join!(state.auth.ping(), state.events.ping());

    if let Err(e) = &users {
        tracing::warn!(error = %e, "User store not ready");
    }
    if let Err(e) = &events {
        tracing::warn!(error = %e, "Event store not ready");
    }

    ReadinessReport::from_checks([("users_store", users.is_ok()), ("events_store", events.is_ok())])
        .into_response_parts()
}

/// Prometheus scrape endpoint.
///
/// Returns 404 when no recorder is installed.
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
