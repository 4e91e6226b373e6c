//! Client behavior against a mock event tracker server.

#![allow(clippy::unwrap_used)]

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use eventtracker_client::{
    ApiClient, ClientError, CreateEvent, EventTracker, FALLBACK_ERROR_MESSAGE, MemoryTokenStore,
    Session, SessionState, TokenStore,
};
use eventtracker_core::environment::Clock;
use eventtracker_core::{AttendanceStatus, EventId};
use eventtracker_testing::{FixedClock, init_test_tracing, test_clock};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EVENT_ID: &str = "6f9619ff-8b86-4d01-b42d-00cf4fc964ff";

fn token(clock: &FixedClock, ttl_secs: i64) -> String {
    let now = clock.now().timestamp();
    let claims = json!({
        "id": 1,
        "email": "ada@example.com",
        "full_name": "Ada Lovelace",
        "iat": now,
        "exp": now + ttl_secs,
    });
    format!(
        "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.{}.signature",
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

fn event_json(liked_by: &[&str]) -> Value {
    json!({
        "_id": EVENT_ID,
        "title": "Standup",
        "description": "daily",
        "date": "2024-01-01",
        "time": "09:00",
        "comments": [],
        "likedBy": liked_by,
        "attendance": [],
    })
}

fn event_id() -> EventId {
    EventId::parse(EVENT_ID).unwrap()
}

struct Fixture {
    server: MockServer,
    store: MemoryTokenStore,
    clock: FixedClock,
}

impl Fixture {
    async fn new() -> Self {
        init_test_tracing();
        Self {
            server: MockServer::start().await,
            store: MemoryTokenStore::new(),
            clock: test_clock(),
        }
    }

    fn open(&self) -> EventTracker {
        let session = Session::new(Arc::new(self.store.clone()), Arc::new(self.clock.clone()));
        EventTracker::open(ApiClient::new(self.server.uri()), session).unwrap()
    }

    async fn request_count(&self) -> usize {
        self.server.received_requests().await.unwrap().len()
    }
}

// ============================================================================
// Logged-out view
// ============================================================================

#[tokio::test]
async fn login_stores_token_and_enters_protected_view() {
    let f = Fixture::new().await;
    let issued = token(&f.clock, 3600);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "token": issued,
            "user": {"id": 1, "full_name": "Ada Lovelace", "email": "ada@example.com"},
        })))
        .expect(1)
        .mount(&f.server)
        .await;

    let mut tracker = f.open();
    assert_eq!(tracker.state(), &SessionState::LoggedOut);

    let user = tracker.login("ada@example.com", "pw").await.unwrap();

    assert_eq!(user.full_name, "Ada Lovelace");
    assert!(tracker.is_logged_in());
    assert_eq!(f.store.load().unwrap(), Some(issued));
}

#[tokio::test]
async fn failed_login_surfaces_server_message() {
    let f = Fixture::new().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "INVALID_CREDENTIALS",
            "message": "Invalid credentials",
        })))
        .mount(&f.server)
        .await;

    let mut tracker = f.open();
    let err = tracker.login("ada@example.com", "wrong").await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(!tracker.is_logged_in());
    assert_eq!(f.store.load().unwrap(), None);
}

#[tokio::test]
async fn unreadable_error_body_uses_fallback_message() {
    let f = Fixture::new().await;

    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&f.server)
        .await;

    let err = f.open().signup("Ada", "ada@example.com", "pw").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
}

#[tokio::test]
async fn signup_does_not_log_in() {
    let f = Fixture::new().await;

    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .and(body_json(json!({
            "full_name": "Ada",
            "email": "ada@example.com",
            "password": "pw",
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"message": "User registered successfully"})),
        )
        .expect(1)
        .mount(&f.server)
        .await;

    let tracker = f.open();
    let message = tracker.signup("Ada", "ada@example.com", "pw").await.unwrap();

    assert_eq!(message, "User registered successfully");
    assert!(!tracker.is_logged_in());
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let f = Fixture::new().await;
    let tracker = EventTracker::open(
        ApiClient::new("http://127.0.0.1:1"),
        Session::new(Arc::new(f.store.clone()), Arc::new(f.clock.clone())),
    )
    .unwrap();

    let err = tracker.signup("Ada", "ada@example.com", "pw").await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
}

// ============================================================================
// Protected view
// ============================================================================

#[tokio::test]
async fn expired_token_is_cleared_without_request() {
    let f = Fixture::new().await;
    f.store.save(&token(&f.clock, 3600)).unwrap();
    f.clock.advance(chrono::Duration::hours(1));

    let mut tracker = f.open();

    assert_eq!(tracker.state(), &SessionState::LoggedOut);
    assert_eq!(f.store.load().unwrap(), None);
    assert!(matches!(tracker.feed().await, Err(ClientError::NotLoggedIn)));
    assert_eq!(f.request_count().await, 0);
}

#[tokio::test]
async fn feed_sends_bearer_token() {
    let f = Fixture::new().await;
    let stored = token(&f.clock, 3600);
    f.store.save(&stored).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/events"))
        .and(header("authorization", format!("Bearer {stored}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([event_json(&[])])))
        .expect(1)
        .mount(&f.server)
        .await;

    let mut tracker = f.open();
    let events = tracker.feed().await.unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Standup");
}

#[tokio::test]
async fn actions_replace_event_in_local_feed() {
    let f = Fixture::new().await;
    f.store.save(&token(&f.clock, 3600)).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([event_json(&[])])))
        .mount(&f.server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/events/{EVENT_ID}/like")))
        .and(body_json(json!({"liked": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Like added",
            "event": event_json(&["ada@example.com"]),
        })))
        .expect(1)
        .mount(&f.server)
        .await;

    let mut tracker = f.open();
    tracker.feed().await.unwrap();
    let event = tracker.like(event_id(), true).await.unwrap();

    assert!(event.is_liked_by("ada@example.com"));
    assert_eq!(tracker.events().len(), 1);
    assert_eq!(tracker.events()[0].like_count(), 1);
}

#[tokio::test]
async fn comment_and_attend_use_token_identity() {
    let f = Fixture::new().await;
    f.store.save(&token(&f.clock, 3600)).unwrap();

    let mut commented = event_json(&[]);
    commented["comments"] = json!([{"user": "Ada Lovelace", "text": "on my way"}]);
    let mut attending = commented.clone();
    attending["attendance"] = json!([{"email": "ada@example.com", "status": "attending"}]);

    Mock::given(method("POST"))
        .and(path(format!("/api/events/{EVENT_ID}/comments")))
        .and(body_json(json!({"user": "Ada Lovelace", "text": "on my way"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Comment added successfully",
            "event": commented,
        })))
        .expect(1)
        .mount(&f.server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/events/{EVENT_ID}/attend")))
        .and(body_json(json!({"email": "ada@example.com", "status": "attending"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Attendance updated",
            "event": attending,
        })))
        .expect(1)
        .mount(&f.server)
        .await;

    let mut tracker = f.open();
    tracker.comment(event_id(), "on my way").await.unwrap();
    let event = tracker.attend(event_id(), AttendanceStatus::Attending).await.unwrap();

    assert_eq!(event.comments.len(), 1);
    assert_eq!(
        event.attendance_of("ada@example.com"),
        Some(AttendanceStatus::Attending)
    );
    assert_eq!(tracker.events(), &[event]);
}

#[tokio::test]
async fn create_appends_to_feed() {
    let f = Fixture::new().await;
    f.store.save(&token(&f.clock, 3600)).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/events"))
        .and(body_json(json!({
            "title": "Standup",
            "description": "daily",
            "date": "2024-01-01",
            "time": "09:00",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(event_json(&[])))
        .expect(1)
        .mount(&f.server)
        .await;

    let mut tracker = f.open();
    let created = tracker
        .create(&CreateEvent {
            title: "Standup".to_string(),
            description: "daily".to_string(),
            date: "2024-01-01".to_string(),
            time: "09:00".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(created.id, event_id());
    assert_eq!(tracker.events().len(), 1);
}

#[tokio::test]
async fn rejected_token_returns_to_logged_out_view() {
    let f = Fixture::new().await;
    f.store.save(&token(&f.clock, 3600)).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "Invalid or expired token"})),
        )
        .mount(&f.server)
        .await;

    let mut tracker = f.open();
    let err = tracker.feed().await.unwrap_err();

    assert!(err.is_auth_failure());
    assert_eq!(tracker.state(), &SessionState::LoggedOut);
    assert_eq!(f.store.load().unwrap(), None);
}

#[tokio::test]
async fn logout_clears_token() {
    let f = Fixture::new().await;
    f.store.save(&token(&f.clock, 3600)).unwrap();

    let mut tracker = f.open();
    assert!(tracker.is_logged_in());

    tracker.logout().unwrap();

    assert!(!tracker.is_logged_in());
    assert_eq!(f.store.load().unwrap(), None);
    assert_eq!(f.request_count().await, 0);
}
