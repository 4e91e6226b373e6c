//! Event documents and their engagement records.
//!
//! An [`Event`] is a document with three nested collections:
//!
//! - `comments`: append-only, insertion order
//! - `likedBy`: a set of user emails (insertion ordered, no duplicates)
//! - `attendance`: at most one [`Attendance`] entry per email
//!
//! The wire format matches the document shape the web client reads: camelCase
//! field names with the identifier serialized as `_id`.
//!
//! The mutation helpers on [`Event`] define the semantics that every
//! [`EventRepository`](crate::event_store::EventRepository) implementation
//! must reproduce atomically.

use crate::validation::{ValidationError, require_all};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Current document schema version.
///
/// Version 1 documents carried a bare `likes` counter; version 2 replaced it
/// with the `likedBy` set and added `attendance`.
pub const EVENT_SCHEMA_VERSION: i32 = 2;

/// Unique identifier for an event, generated by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Generate a new random `EventId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier taken from a request path.
    ///
    /// Returns `None` for anything that is not a well-formed identifier; callers
    /// treat that the same as an identifier that matches no document.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A comment posted on an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Display name or email of the author.
    pub user: String,
    /// Comment body.
    pub text: String,
}

impl Comment {
    /// Build a comment from optional request fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if `user` or `text` is missing or empty.
    pub fn new(user: Option<String>, text: Option<String>) -> Result<Self, ValidationError> {
        let [user, text] = require_all([user, text], "User and comment text are required")?;
        Ok(Self { user, text })
    }
}

/// RSVP status for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    /// The user will attend.
    Attending,
    /// The user might attend.
    Maybe,
    /// The user will not attend.
    NotAttending,
}

impl AttendanceStatus {
    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attending => "attending",
            Self::Maybe => "maybe",
            Self::NotAttending => "not-attending",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attending" => Ok(Self::Attending),
            "maybe" => Ok(Self::Maybe),
            "not-attending" => Ok(Self::NotAttending),
            other => Err(ValidationError::new(format!(
                "Invalid attendance status '{other}'. Expected one of: attending, maybe, not-attending"
            ))),
        }
    }
}

/// One user's RSVP for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Email of the responding user.
    pub email: String,
    /// Their answer.
    pub status: AttendanceStatus,
}

/// Input for creating an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Event date as entered by the user.
    pub date: String,
    /// Event time as entered by the user.
    pub time: String,
}

impl NewEvent {
    /// Build a new event from optional request fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if any field is missing or empty.
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        date: Option<String>,
        time: Option<String>,
    ) -> Result<Self, ValidationError> {
        let [title, description, date, time] =
            require_all([title, description, date, time], "All fields are required")?;
        Ok(Self {
            title,
            description,
            date,
            time,
        })
    }

    /// Materialize the document with empty engagement collections.
    #[must_use]
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            comments: Vec::new(),
            liked_by: Vec::new(),
            attendance: Vec::new(),
        }
    }
}

/// An event document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-generated identifier.
    #[serde(rename = "_id")]
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Event date.
    pub date: String,
    /// Event time.
    pub time: String,
    /// Comments in insertion order.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Emails of users who like the event; no duplicates.
    #[serde(default)]
    pub liked_by: Vec<String>,
    /// RSVPs; at most one per email.
    #[serde(default)]
    pub attendance: Vec<Attendance>,
}

impl Event {
    /// Append a comment.
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Add or remove `email` from the like set.
    ///
    /// Returns `true` if the set changed. Both directions are idempotent.
    pub fn set_like(&mut self, email: &str, liked: bool) -> bool {
        let position = self.liked_by.iter().position(|e| e == email);
        match (liked, position) {
            (true, None) => {
                self.liked_by.push(email.to_string());
                true
            }
            (false, Some(index)) => {
                self.liked_by.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Replace any RSVP for `email` with `status`.
    ///
    /// The new entry is appended after the remaining entries.
    pub fn set_attendance(&mut self, email: &str, status: AttendanceStatus) {
        self.attendance.retain(|a| a.email != email);
        self.attendance.push(Attendance {
            email: email.to_string(),
            status,
        });
    }

    /// Number of likes.
    #[must_use]
    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    /// Whether `email` likes this event.
    #[must_use]
    pub fn is_liked_by(&self, email: &str) -> bool {
        self.liked_by.iter().any(|e| e == email)
    }

    /// The RSVP recorded for `email`, if any.
    #[must_use]
    pub fn attendance_of(&self, email: &str) -> Option<AttendanceStatus> {
        self.attendance
            .iter()
            .find(|a| a.email == email)
            .map(|a| a.status)
    }
}
