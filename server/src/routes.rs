//! Router configuration for the event tracker.

use crate::api::events;
use crate::health::{metrics_handler, readiness_check};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};
use eventtracker_auth::auth_router;
use eventtracker_web::correlation_id_layer;
use eventtracker_web::handlers::health_check;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Configures all routes including:
/// - Health, readiness and metrics (no authentication)
/// - `/auth` sign-up, login and current user
/// - `/api/events` endpoints (bearer token required)
///
/// Layers, outermost first: correlation id, request tracing, CORS.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api_routes = Router::new()
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/:id", get(events::get_event))
        .route("/events/:id/comments", post(events::add_comment))
        .route("/events/:id/like", put(events::set_like))
        .route("/events/:id/attend", put(events::update_attendance));

    Router::new()
        // Health checks (no authentication)
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .nest("/auth", auth_router(state.auth.clone()))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
}
