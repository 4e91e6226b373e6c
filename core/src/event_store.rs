//! Event repository trait and related types.
//!
//! This module defines the abstraction over the document store that holds
//! events. Every operation is a single store round trip; mutations are
//! expected to be atomic per document so that concurrent requests touching
//! the same event cannot interleave.
//!
//! # Implementations
//!
//! - `PostgresEventRepository` (in `eventtracker-postgres`): JSONB documents
//! - `InMemoryEventRepository` (in `eventtracker-testing`): fast, deterministic tests
//!
//! # Example
//!
//! ```no_run
//! use eventtracker_core::event::{Comment, NewEvent};
//! use eventtracker_core::event_store::{EventRepository, StoreError};
//!
//! async fn example(store: &dyn EventRepository) -> Result<(), StoreError> {
//!     let event = store
//!         .create_event(NewEvent {
//!             title: "Standup".into(),
//!             description: "daily".into(),
//!             date: "2024-01-01".into(),
//!             time: "09:00".into(),
//!         })
//!         .await?;
//!
//!     let comment = Comment { user: "Ada".into(), text: "See you there".into() };
//!     let updated = store.add_comment(event.id, comment).await?;
//!     assert_eq!(updated.comments.len(), 1);
//!     Ok(())
//! }
//! ```

use crate::event::{Attendance, Comment, Event, EventId, NewEvent};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by repository operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Errors that can occur during event store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No document matched the identifier (zero documents modified).
    #[error("Event not found: {0}")]
    NotFound(EventId),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored document could not be decoded into a typed event.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Store configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Document store abstraction for events.
///
/// # Dyn Compatibility
///
/// Methods return [`StoreFuture`] rather than using `async fn` so the
/// repository can be shared as `Arc<dyn EventRepository>` in application state.
pub trait EventRepository: Send + Sync {
    /// Insert a new event with empty comments, likes and attendance.
    ///
    /// Returns the stored document including its generated identifier.
    ///
    /// # Errors
    ///
    /// - `Database`: the insert failed
    fn create_event(&self, event: NewEvent) -> StoreFuture<'_, Event>;

    /// Load every event in store order (oldest first). Empty if none exist.
    ///
    /// # Errors
    ///
    /// - `Database`: the query failed
    /// - `Serialization`: a stored document is malformed
    fn list_events(&self) -> StoreFuture<'_, Vec<Event>>;

    /// Load one event.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no event has this identifier
    /// - `Database`: the query failed
    fn get_event(&self, id: EventId) -> StoreFuture<'_, Event>;

    /// Append a comment to an event and return the updated document.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no event has this identifier
    /// - `Database`: the update failed
    fn add_comment(&self, id: EventId, comment: Comment) -> StoreFuture<'_, Event>;

    /// Add (`liked = true`) or remove (`liked = false`) `email` from the like set.
    ///
    /// Both directions are idempotent set operations.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no event has this identifier
    /// - `Database`: the update failed
    fn set_like(&self, id: EventId, email: String, liked: bool) -> StoreFuture<'_, Event>;

    /// Replace any RSVP for `attendance.email` with `attendance` in one atomic update.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no event has this identifier
    /// - `Database`: the update failed
    fn set_attendance(&self, id: EventId, attendance: Attendance) -> StoreFuture<'_, Event>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// - `Database`: the store did not answer
    fn ping(&self) -> StoreFuture<'_, ()>;
}
