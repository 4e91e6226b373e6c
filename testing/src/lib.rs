//! # Event Tracker Testing
//!
//! Testing utilities and helpers for the event tracker.
//!
//! This crate provides:
//! - Mock implementations of environment traits ([`FixedClock`])
//! - An in-memory [`EventRepository`](eventtracker_core::EventRepository)
//! - [`TestApp`], a harness that drives an axum router without a socket
//!
//! ## Example
//!
//! ```ignore
//! use eventtracker_testing::{InMemoryEventRepository, TestApp};
//!
//! #[tokio::test]
//! async fn test_list_events() {
//!     let app = TestApp::new(build_router(Arc::new(InMemoryEventRepository::new())));
//!
//!     let response = app.get("/api/events", Some(&token)).await;
//!     assert_eq!(response.status, StatusCode::OK);
//! }
//! ```

use chrono::{DateTime, Utc};
use eventtracker_core::environment::Clock;

pub mod app;
pub mod event_store;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Returns the same time until moved with [`FixedClock::advance`]. Clones
    /// share the same time, so a test can keep a handle and move the clock
    /// that a service holds.
    ///
    /// # Example
    ///
    /// ```
    /// use eventtracker_testing::mocks::FixedClock;
    /// use eventtracker_core::environment::Clock;
    /// use chrono::{Duration, Utc};
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let shared = clock.clone();
    /// let before = clock.now();
    /// assert_eq!(before, clock.now());
    ///
    /// shared.advance(Duration::seconds(5));
    /// assert_eq!(clock.now() - before, Duration::seconds(5));
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(time)),
            }
        }

        /// Move the clock forward.
        pub fn advance(&self, by: chrono::Duration) {
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            *time += by;
        }

        /// Set the clock to `time`.
        pub fn set(&self, time: DateTime<Utc>) {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner) = time;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Install a tracing subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use app::{TestApp, TestResponse};
pub use event_store::InMemoryEventRepository;
pub use mocks::{FixedClock, test_clock};
