//! In-memory event repository.

use eventtracker_core::{
    Attendance, Comment, Event, EventId, EventRepository, NewEvent, StoreError, StoreFuture,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Event repository backed by a `Vec`, kept in insertion order.
///
/// Counts every call so tests can assert that rejected requests never
/// reached the store, and can be switched to fail like an unreachable
/// database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventRepository {
    events: Arc<Mutex<Vec<Event>>>,
    calls: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryEventRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `events`.
    #[must_use]
    pub fn with_events(events: Vec<Event>) -> Self {
        let repo = Self::new();
        if let Ok(mut stored) = repo.events.lock() {
            *stored = events;
        }
        repo
    }

    /// Number of repository calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every call fail with a database error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Copy of the stored events.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Event>>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Database("store unavailable".to_string()));
        }
        self.events
            .lock()
            .map_err(|_| StoreError::Database("event store lock poisoned".to_string()))
    }

    fn update(&self, id: EventId, apply: impl FnOnce(&mut Event)) -> Result<Event, StoreError> {
        let mut events = self.lock()?;
        let event = events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or(StoreError::NotFound(id))?;
        apply(event);
        Ok(event.clone())
    }
}

impl EventRepository for InMemoryEventRepository {
    fn create_event(&self, event: NewEvent) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let event = event.into_event(EventId::new());
            self.lock()?.push(event.clone());
            Ok(event)
        })
    }

    fn list_events(&self) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move { Ok(self.lock()?.clone()) })
    }

    fn get_event(&self, id: EventId) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            self.lock()?
                .iter()
                .find(|event| event.id == id)
                .cloned()
                .ok_or(StoreError::NotFound(id))
        })
    }

    fn add_comment(&self, id: EventId, comment: Comment) -> StoreFuture<'_, Event> {
        Box::pin(async move { self.update(id, |event| event.add_comment(comment)) })
    }

    fn set_like(&self, id: EventId, email: String, liked: bool) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            self.update(id, |event| {
                event.set_like(&email, liked);
            })
        })
    }

    fn set_attendance(&self, id: EventId, attendance: Attendance) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            self.update(id, |event| {
                event.set_attendance(&attendance.email, attendance.status);
            })
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.lock()?;
            Ok(())
        })
    }
}
