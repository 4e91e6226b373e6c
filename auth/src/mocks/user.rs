//! Mock user repository for testing.

use crate::error::{AuthError, Result};
use crate::providers::{NewUser, User, UserFuture, UserRepository};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Users {
    next_id: i64,
    by_email: HashMap<String, User>,
}

/// Mock user repository.
///
/// Uses in-memory storage for testing. Ids are assigned from 1 upwards.
#[derive(Debug, Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Users>>,
    unavailable: Arc<AtomicBool>,
}

impl MockUserRepository {
    /// Create a new mock user repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with a database error, as if the store were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored users.
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.by_email.len())
    }

    /// Whether the repository is empty.
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Users>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::DatabaseError("store unavailable".to_string()));
        }
        self.users
            .lock()
            .map_err(|_| AuthError::InternalError("user store lock poisoned".to_string()))
    }
}

impl UserRepository for MockUserRepository {
    fn create_user(&self, user: NewUser) -> UserFuture<'_, User> {
        Box::pin(async move {
            let mut users = self.lock()?;

            if users.by_email.contains_key(&user.email) {
                return Err(AuthError::EmailTaken);
            }

            users.next_id += 1;
            let stored = User {
                id: users.next_id,
                full_name: user.full_name,
                email: user.email,
                password_hash: user.password_hash,
                created_at: Utc::now(),
            };
            users.by_email.insert(stored.email.clone(), stored.clone());

            Ok(stored)
        })
    }

    fn find_by_email<'a>(&'a self, email: &'a str) -> UserFuture<'a, User> {
        Box::pin(async move {
            self.lock()?
                .by_email
                .get(email)
                .cloned()
                .ok_or(AuthError::UserNotFound)
        })
    }

    fn find_by_id(&self, id: i64) -> UserFuture<'_, User> {
        Box::pin(async move {
            self.lock()?
                .by_email
                .values()
                .find(|user| user.id == id)
                .cloned()
                .ok_or(AuthError::UserNotFound)
        })
    }

    fn ping(&self) -> UserFuture<'_, ()> {
        Box::pin(async move {
            self.lock()?;
            Ok(())
        })
    }
}
