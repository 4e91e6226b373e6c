//! # Event Tracker Core
//!
//! Domain types and store contracts shared by every crate in the workspace.
//!
//! ## Contents
//!
//! - **Events**: [`event::Event`] documents with their comments, likes and
//!   attendance, plus the [`event::NewEvent`] input used to create them
//! - **Event store**: the [`event_store::EventRepository`] contract implemented
//!   by the `PostgreSQL` driver and by the in-memory test double
//! - **Validation**: required-field checks shared by the auth and event APIs
//! - **Environment**: the [`environment::Clock`] abstraction so token issuance
//!   and expiry checks are deterministic under test
//!
//! ## Example
//!
//! ```
//! use eventtracker_core::event::{AttendanceStatus, NewEvent};
//!
//! let new_event = NewEvent::new(
//!     Some("Standup".to_string()),
//!     Some("daily".to_string()),
//!     Some("2024-01-01".to_string()),
//!     Some("09:00".to_string()),
//! )
//! .unwrap();
//!
//! let mut event = new_event.into_event(eventtracker_core::event::EventId::new());
//! event.set_attendance("ada@example.com", AttendanceStatus::Maybe);
//! event.set_attendance("ada@example.com", AttendanceStatus::Attending);
//!
//! assert_eq!(event.attendance.len(), 1);
//! assert_eq!(event.attendance[0].status, AttendanceStatus::Attending);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod event;
pub mod event_store;
pub mod validation;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use event::{Attendance, AttendanceStatus, Comment, Event, EventId, NewEvent};
pub use event_store::{EventRepository, StoreError, StoreFuture};
pub use validation::ValidationError;

/// Environment module - injected dependencies that are not stores.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use eventtracker_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let before = chrono::Utc::now();
    /// assert!(clock.now() >= before);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
