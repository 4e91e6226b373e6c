//! User repository trait.

use super::{NewUser, User};
use crate::error::Result;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`UserRepository`] methods.
pub type UserFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// User repository.
///
/// Object-safe so the service can hold an `Arc<dyn UserRepository>`.
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Email already exists → `AuthError::EmailTaken`
    /// - Database query fails
    fn create_user(&self, user: NewUser) -> UserFuture<'_, User>;

    /// Get user by email.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - User not found → `AuthError::UserNotFound`
    /// - Database query fails
    fn find_by_email<'a>(&'a self, email: &'a str) -> UserFuture<'a, User>;

    /// Get user by id.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - User not found → `AuthError::UserNotFound`
    /// - Database query fails
    fn find_by_id(&self, id: i64) -> UserFuture<'_, User>;

    /// Check connectivity.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store is unreachable.
    fn ping(&self) -> UserFuture<'_, ()>;
}
