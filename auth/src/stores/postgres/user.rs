//! PostgreSQL user repository implementation.
//!
//! # Example
//!
//! ```no_run
//! use eventtracker_auth::stores::postgres::PostgresUserRepository;
//! use sqlx::PgPool;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = PgPool::connect("postgresql://localhost/users").await?;
//! let repo = PostgresUserRepository::new(pool);
//! repo.migrate().await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::providers::{NewUser, User, UserFuture, UserRepository};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL user repository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    full_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

impl PostgresUserRepository {
    /// Create a new PostgreSQL user repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations.
    ///
    /// # Errors
    ///
    /// Returns error if migrations fail.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Migration failed: {e}")))?;
        Ok(())
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn database_error(context: &str, error: &sqlx::Error) -> AuthError {
    metrics::counter!("eventtracker_user_store_errors_total").increment(1);
    AuthError::DatabaseError(format!("{context}: {error}"))
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(sqlx::error::DatabaseError::code)
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}

impl UserRepository for PostgresUserRepository {
    fn create_user(&self, user: NewUser) -> UserFuture<'_, User> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, UserRow>(
                r"
                INSERT INTO users (full_name, email, password_hash)
                VALUES ($1, $2, $3)
                RETURNING id, full_name, email, password_hash, created_at
                ",
            )
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AuthError::EmailTaken
                } else {
                    database_error("Failed to create user", &e)
                }
            })?;

            Ok(row.into())
        })
    }

    fn find_by_email<'a>(&'a self, email: &'a str) -> UserFuture<'a, User> {
        Box::pin(async move {
            sqlx::query_as::<_, UserRow>(
                r"
                SELECT id, full_name, email, password_hash, created_at
                FROM users
                WHERE email = $1
                ",
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to get user", &e))?
            .map(User::from)
            .ok_or(AuthError::UserNotFound)
        })
    }

    fn find_by_id(&self, id: i64) -> UserFuture<'_, User> {
        Box::pin(async move {
            sqlx::query_as::<_, UserRow>(
                r"
                SELECT id, full_name, email, password_hash, created_at
                FROM users
                WHERE id = $1
                ",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to get user", &e))?
            .map(User::from)
            .ok_or(AuthError::UserNotFound)
        })
    }

    fn ping(&self) -> UserFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query_scalar::<_, i32>("SELECT 1")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| database_error("Ping failed", &e))?;
            Ok(())
        })
    }
}
