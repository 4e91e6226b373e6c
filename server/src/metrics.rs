//! Business metrics for the event tracker.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `eventtracker_events_created_total` - Events created
//! - `eventtracker_comments_total` - Comments added
//! - `eventtracker_likes_total{action}` - Like set updates (`added`, `removed`)
//! - `eventtracker_attendance_updates_total{status}` - Attendance updates by status
//! - `eventtracker_signups_total`, `eventtracker_logins_total{outcome}` - see the auth crate
//! - `eventtracker_store_errors_total{operation}` - Event store failures

use eventtracker_core::AttendanceStatus;
use metrics::describe_counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and register metric descriptions.
///
/// # Errors
///
/// Returns error if a recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_business_metrics();
    eventtracker_auth::metrics::describe();
    Ok(handle)
}

/// Initialize and register all business metrics descriptions.
pub fn register_business_metrics() {
    describe_counter!("eventtracker_events_created_total", "Total number of events created");
    describe_counter!("eventtracker_comments_total", "Total number of comments added");
    describe_counter!(
        "eventtracker_likes_total",
        "Like set updates by action (added, removed)"
    );
    describe_counter!(
        "eventtracker_attendance_updates_total",
        "Attendance updates by status (attending, maybe, not-attending)"
    );
    describe_counter!(
        "eventtracker_store_errors_total",
        "Event store failures by operation"
    );

    tracing::info!("Business metrics registered");
}

// ============================================================================
// Metric Recording Functions
// ============================================================================

/// Record an event creation.
pub fn record_event_created() {
    metrics::counter!("eventtracker_events_created_total").increment(1);
}

/// Record a comment.
pub fn record_comment_added() {
    metrics::counter!("eventtracker_comments_total").increment(1);
}

/// Record a like or unlike.
pub fn record_like(liked: bool) {
    let action = if liked { "added" } else { "removed" };
    metrics::counter!("eventtracker_likes_total", "action" => action).increment(1);
}

/// Record an attendance update.
pub fn record_attendance(status: AttendanceStatus) {
    metrics::counter!("eventtracker_attendance_updates_total", "status" => status.as_str())
        .increment(1);
}
