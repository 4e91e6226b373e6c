//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use axum::{Json, http::StatusCode};
use serde::Serialize;
use std::collections::BTreeMap;

/// Liveness response body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK to indicate the service is running.
/// This endpoint does NOT check dependencies (database, etc.).
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// { "status": "ok", "version": "0.1.0" }
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Readiness report across named dependencies.
///
/// Serializes as `{"ready": bool, "<component>": "up" | "down", ...}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReadinessReport {
    /// `true` only if every component is up.
    pub ready: bool,
    /// Per-component status.
    #[serde(flatten)]
    pub components: BTreeMap<&'static str, &'static str>,
}

impl ReadinessReport {
    /// Build a report from `(component, is_up)` pairs.
    #[must_use]
    pub fn from_checks(checks: impl IntoIterator<Item = (&'static str, bool)>) -> Self {
        let components: BTreeMap<_, _> = checks
            .into_iter()
            .map(|(name, up)| (name, if up { "up" } else { "down" }))
            .collect();
        let ready = components.values().all(|status| *status == "up");
        Self { ready, components }
    }

    /// Render as a response: 200 when ready, 503 otherwise.
    #[must_use]
    pub fn into_response_parts(self) -> (StatusCode, Json<Self>) {
        let status = if self.ready {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (status, Json(self))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, Json(body)) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
    }

    #[test]
    fn test_readiness_all_up() {
        let report = ReadinessReport::from_checks([("users_store", true), ("events_store", true)]);
        let (status, Json(report)) = report.into_response_parts();
        assert_eq!(status, StatusCode::OK);
        assert!(report.ready);
    }

    #[test]
    fn test_readiness_one_down() {
        let report = ReadinessReport::from_checks([("users_store", true), ("events_store", false)]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"ready": false, "users_store": "up", "events_store": "down"})
        );
        let (status, _) = report.into_response_parts();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
