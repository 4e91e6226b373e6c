//! Application state for the event tracker HTTP server.

use axum::extract::FromRef;
use eventtracker_auth::AuthService;
use eventtracker_core::EventRepository;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply via `Arc`) for each request. Stores are constructed at
/// start-up and injected here; handlers never reach for globals.
#[derive(Clone)]
pub struct AppState {
    /// Event document store
    pub events: Arc<dyn EventRepository>,

    /// Sign-up, login and token verification
    pub auth: Arc<AuthService>,

    /// Prometheus handle for `/metrics`; `None` when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(events: Arc<dyn EventRepository>, auth: Arc<AuthService>) -> Self {
        Self {
            events,
            auth,
            metrics: None,
        }
    }

    /// Attach the Prometheus handle rendered at `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

// Lets the `AuthUser` extractor reach the auth service from `AppState`
impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}
