//! JSONB-backed event document store.
//!
//! Each event is one row; the typed event body lives in a `data` JSONB column
//! and the store generates the `id`:
//!
//! ```sql
//! CREATE TABLE events (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     data JSONB NOT NULL,
//!     schema_version INTEGER NOT NULL DEFAULT 2,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```
//!
//! Every mutation is a single `UPDATE ... RETURNING` statement, so concurrent
//! requests against the same event are serialized by the row lock and cannot
//! lose updates or produce duplicate attendance entries.

use eventtracker_core::event::{Attendance, Comment, EVENT_SCHEMA_VERSION, Event, EventId, NewEvent};
use eventtracker_core::event_store::{EventRepository, StoreError, StoreFuture};
use sqlx::PgPool;

/// Projection that turns a row into the wire document.
const DOCUMENT: &str = "data || jsonb_build_object('_id', id::text)";

/// SQL statements for one table, built once at construction.
#[derive(Debug, Clone)]
struct Queries {
    create_table: String,
    create_index: String,
    upgrade_legacy: String,
    insert: String,
    list: String,
    get: String,
    add_comment: String,
    add_like: String,
    remove_like: String,
    set_attendance: String,
}

impl Queries {
    fn for_table(table: &str) -> Self {
        Self {
            create_table: format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    data JSONB NOT NULL,
                    schema_version INTEGER NOT NULL DEFAULT {EVENT_SCHEMA_VERSION},
                    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
                )"
            ),
            create_index: format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_created_at ON {table}(created_at)"
            ),
            // Counter-era documents: drop `likes`, add the set and attendance arrays.
            upgrade_legacy: format!(
                "UPDATE {table}
                 SET data = (data - 'likes') || jsonb_build_object(
                         'comments', COALESCE(data->'comments', '[]'::jsonb),
                         'likedBy', COALESCE(data->'likedBy', '[]'::jsonb),
                         'attendance', COALESCE(data->'attendance', '[]'::jsonb)
                     ),
                     schema_version = {EVENT_SCHEMA_VERSION}
                 WHERE schema_version < {EVENT_SCHEMA_VERSION} OR NOT (data ? 'likedBy')"
            ),
            insert: format!(
                "INSERT INTO {table} (data, schema_version) VALUES ($1, {EVENT_SCHEMA_VERSION})
                 RETURNING {DOCUMENT}"
            ),
            list: format!("SELECT {DOCUMENT} FROM {table} ORDER BY created_at ASC, id ASC"),
            get: format!("SELECT {DOCUMENT} FROM {table} WHERE id = $1"),
            add_comment: format!(
                "UPDATE {table}
                 SET data = jsonb_set(
                     data, '{{comments}}',
                     COALESCE(data->'comments', '[]'::jsonb) || jsonb_build_array($2::jsonb)
                 )
                 WHERE id = $1
                 RETURNING {DOCUMENT}"
            ),
            add_like: format!(
                "UPDATE {table}
                 SET data = jsonb_set(
                     data, '{{likedBy}}',
                     CASE WHEN COALESCE(data->'likedBy', '[]'::jsonb) ? $2
                          THEN COALESCE(data->'likedBy', '[]'::jsonb)
                          ELSE COALESCE(data->'likedBy', '[]'::jsonb) || jsonb_build_array($2::text)
                     END
                 )
                 WHERE id = $1
                 RETURNING {DOCUMENT}"
            ),
            remove_like: format!(
                "UPDATE {table}
                 SET data = jsonb_set(
                     data, '{{likedBy}}',
                     COALESCE(data->'likedBy', '[]'::jsonb) - $2::text
                 )
                 WHERE id = $1
                 RETURNING {DOCUMENT}"
            ),
            set_attendance: format!(
                "UPDATE {table}
                 SET data = jsonb_set(
                     data, '{{attendance}}',
                     COALESCE(
                         (SELECT jsonb_agg(entry ORDER BY position)
                          FROM jsonb_array_elements(COALESCE(data->'attendance', '[]'::jsonb))
                               WITH ORDINALITY AS existing(entry, position)
                          WHERE entry->>'email' <> $2),
                         '[]'::jsonb
                     ) || jsonb_build_array($3::jsonb)
                 )
                 WHERE id = $1
                 RETURNING {DOCUMENT}"
            ),
        }
    }
}

/// Event repository backed by a `PostgreSQL` JSONB table.
#[derive(Clone)]
pub struct PostgresEventRepository {
    pool: PgPool,
    table_name: String,
    queries: Queries,
}

impl PostgresEventRepository {
    /// Create a repository over `table_name` using an existing pool.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configuration`] if `table_name` is not a plain
    /// identifier (ASCII letters, digits and underscores, not starting with a digit).
    pub fn new(pool: PgPool, table_name: impl Into<String>) -> Result<Self, StoreError> {
        let table_name = table_name.into();
        validate_table_name(&table_name)?;
        let queries = Queries::for_table(&table_name);
        Ok(Self {
            pool,
            table_name,
            queries,
        })
    }

    /// Create the table if needed and upgrade counter-era documents.
    ///
    /// Returns the number of documents upgraded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if any statement fails.
    pub async fn migrate(&self) -> Result<u64, StoreError> {
        for statement in [&self.queries.create_table, &self.queries.create_index] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Database(format!("Migration failed: {e}")))?;
        }

        let upgraded = sqlx::query(&self.queries.upgrade_legacy)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Legacy upgrade failed: {e}")))?
            .rows_affected();

        if upgraded > 0 {
            tracing::info!(table = %self.table_name, upgraded, "Upgraded legacy event documents");
        }
        Ok(upgraded)
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn fetch_updated(
        &self,
        operation: &'static str,
        id: EventId,
        query: sqlx::query::QueryScalar<'_, sqlx::Postgres, serde_json::Value, sqlx::postgres::PgArguments>,
    ) -> Result<Event, StoreError> {
        let document = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error(operation, &e))?
            .ok_or(StoreError::NotFound(id))?;
        decode(document)
    }
}

/// Reject anything that is not a plain SQL identifier.
///
/// # Errors
///
/// Returns [`StoreError::Configuration`] if `name` is empty, starts with a
/// digit, or contains anything but ASCII letters, digits and underscores.
pub fn validate_table_name(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(StoreError::Configuration(format!(
            "Invalid table name '{name}': use letters, digits and underscores"
        )))
    }
}

fn database_error(operation: &'static str, error: &sqlx::Error) -> StoreError {
    metrics::counter!("eventtracker_store_errors_total", "operation" => operation).increment(1);
    StoreError::Database(format!("Failed to {operation}: {error}"))
}

fn decode(document: serde_json::Value) -> Result<Event, StoreError> {
    serde_json::from_value(document).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn encode<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

impl EventRepository for PostgresEventRepository {
    fn create_event(&self, event: NewEvent) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let body = serde_json::json!({
                "title": event.title,
                "description": event.description,
                "date": event.date,
                "time": event.time,
                "comments": [],
                "likedBy": [],
                "attendance": [],
            });

            let document: serde_json::Value = sqlx::query_scalar(&self.queries.insert)
                .bind(&body)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| database_error("create event", &e))?;
            decode(document)
        })
    }

    fn list_events(&self) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move {
            let documents: Vec<serde_json::Value> = sqlx::query_scalar(&self.queries.list)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| database_error("list events", &e))?;
            documents.into_iter().map(decode).collect()
        })
    }

    fn get_event(&self, id: EventId) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let query = sqlx::query_scalar(&self.queries.get).bind(id.as_uuid());
            self.fetch_updated("get event", id, query).await
        })
    }

    fn add_comment(&self, id: EventId, comment: Comment) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let comment = encode(&comment)?;
            let query = sqlx::query_scalar(&self.queries.add_comment)
                .bind(id.as_uuid())
                .bind(comment);
            self.fetch_updated("add comment", id, query).await
        })
    }

    fn set_like(&self, id: EventId, email: String, liked: bool) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let statement = if liked {
                &self.queries.add_like
            } else {
                &self.queries.remove_like
            };
            let query = sqlx::query_scalar(statement).bind(id.as_uuid()).bind(email);
            self.fetch_updated("update likes", id, query).await
        })
    }

    fn set_attendance(&self, id: EventId, attendance: Attendance) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let entry = encode(&attendance)?;
            let query = sqlx::query_scalar(&self.queries.set_attendance)
                .bind(id.as_uuid())
                .bind(attendance.email)
                .bind(entry);
            self.fetch_updated("update attendance", id, query).await
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map_err(|e| database_error("ping", &e))?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(validate_table_name("events").is_ok());
        assert!(validate_table_name("_events_v2").is_ok());
    }

    #[test]
    fn rejects_unsafe_identifiers() {
        for name in ["", "2events", "events; DROP TABLE users", "ev-ents", "évents"] {
            assert!(
                matches!(validate_table_name(name), Err(StoreError::Configuration(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn queries_target_the_configured_table() {
        let queries = Queries::for_table("party_events");
        assert!(queries.insert.contains("INSERT INTO party_events"));
        assert!(queries.add_comment.contains("'{comments}'"));
        assert!(queries.create_index.contains("idx_party_events_created_at"));
    }
}
