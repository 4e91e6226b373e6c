//! Event API endpoints.
//!
//! Every route requires a valid bearer token:
//! - GET /api/events - List all events in creation order
//! - POST /api/events - Create an event
//! - GET /api/events/:id - Get one event
//! - POST /api/events/:id/comments - Append a comment
//! - PUT /api/events/:id/like - Add or remove the caller from `likedBy`
//! - PUT /api/events/:id/attend - Set one attendance entry per email

use crate::metrics;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use eventtracker_auth::AuthUser;
use eventtracker_core::validation::present;
use eventtracker_core::{
    Attendance, AttendanceStatus, Comment, Event, EventId, NewEvent, ValidationError,
};
use eventtracker_web::error::EVENT_NOT_FOUND_MESSAGE;
use eventtracker_web::{AppError, JsonBody};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to create a new event.
///
/// Fields are optional so a missing one is a 400, not a 422.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateEventRequest {
    /// Event title
    pub title: Option<String>,
    /// Event description
    pub description: Option<String>,
    /// Event date, as entered
    pub date: Option<String>,
    /// Event time, as entered
    pub time: Option<String>,
}

/// Request to add a comment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommentRequest {
    /// Comment author
    pub user: Option<String>,
    /// Comment text
    pub text: Option<String>,
}

/// Request to like or unlike an event.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LikeRequest {
    /// `true` to like, `false` to unlike
    pub liked: Option<bool>,
}

/// Request to update attendance.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AttendRequest {
    /// Attendee email; defaults to the caller's
    pub email: Option<String>,
    /// One of `attending`, `maybe`, `not-attending`
    pub status: Option<String>,
}

/// Response for a mutation: outcome message plus the updated event.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventUpdateResponse {
    /// Outcome message
    pub message: String,
    /// The event after the update
    pub event: Event,
}

impl EventUpdateResponse {
    fn new(message: &str, event: Event) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
            event,
        })
    }
}

/// Path ids that are not well-formed cannot match a document.
fn parse_event_id(raw: &str) -> Result<EventId, AppError> {
    EventId::parse(raw).ok_or_else(|| AppError::not_found(EVENT_NOT_FOUND_MESSAGE))
}

// ============================================================================
// Handlers
// ============================================================================

/// List all events.
///
/// # Example
///
/// ```bash
/// curl http://localhost:5000/api/events -H "Authorization: Bearer <token>"
/// ```
pub async fn list_events(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.events.list_events().await?))
}

/// Create a new event.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:5000/api/events \
///   -H "Authorization: Bearer <token>" \
///   -H "Content-Type: application/json" \
///   -d '{"title":"Standup","description":"daily","date":"2024-01-01","time":"09:00"}'
/// ```
pub async fn create_event(
    user: AuthUser,
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let new_event = NewEvent::new(
        request.title,
        request.description,
        request.date,
        request.time,
    )?;

    let event = state.events.create_event(new_event).await?;

    metrics::record_event_created();
    tracing::info!(event_id = %event.id, user_id = user.0.id, "Event created");

    Ok((StatusCode::CREATED, Json(event)))
}

/// Get one event.
pub async fn get_event(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let id = parse_event_id(&id)?;
    Ok(Json(state.events.get_event(id).await?))
}

/// Append a comment.
pub async fn add_comment(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<CommentRequest>,
) -> Result<Json<EventUpdateResponse>, AppError> {
    let comment = Comment::new(request.user, request.text)?;
    let id = parse_event_id(&id)?;

    let event = state.events.add_comment(id, comment).await?;

    metrics::record_comment_added();
    tracing::debug!(event_id = %id, comments = event.comments.len(), "Comment added");

    Ok(EventUpdateResponse::new("Comment added successfully", event))
}

/// Like or unlike an event as the caller.
pub async fn set_like(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<LikeRequest>,
) -> Result<Json<EventUpdateResponse>, AppError> {
    let liked = request
        .liked
        .ok_or_else(|| ValidationError::new("liked is required"))?;
    let id = parse_event_id(&id)?;

    let event = state
        .events
        .set_like(id, user.email().to_string(), liked)
        .await?;

    metrics::record_like(liked);
    tracing::debug!(event_id = %id, liked, likes = event.like_count(), "Like updated");

    let message = if liked { "Like added" } else { "Like removed" };
    Ok(EventUpdateResponse::new(message, event))
}

/// Set the attendance status for an email (the caller's by default).
pub async fn update_attendance(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<AttendRequest>,
) -> Result<Json<EventUpdateResponse>, AppError> {
    let status: AttendanceStatus = present(request.status)
        .ok_or_else(|| ValidationError::new("status is required"))?
        .parse()?;
    let email = present(request.email).unwrap_or_else(|| user.email().to_string());
    let id = parse_event_id(&id)?;

    let event = state
        .events
        .set_attendance(id, Attendance { email, status })
        .await?;

    metrics::record_attendance(status);
    tracing::debug!(event_id = %id, %status, "Attendance updated");

    Ok(EventUpdateResponse::new("Attendance updated", event))
}
