//! The client's view state machine.
//!
//! Mirrors the browser front end: a logged-out view with login and signup,
//! and a protected view holding the event feed. Every action makes at most
//! one API call and replaces the affected event in the local feed.

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::session::{Session, SessionState};
use crate::types::{CreateEvent, TokenClaims, UserSummary};
use eventtracker_core::{AttendanceStatus, Event, EventId};

/// Client controller: session, API and the local feed.
pub struct EventTracker {
    api: ApiClient,
    session: Session,
    state: SessionState,
    events: Vec<Event>,
}

impl EventTracker {
    /// Restore any stored session and attach its token to `api`.
    ///
    /// An expired or unreadable token is cleared here; no request is made.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::TokenStore`] if the token store fails.
    pub fn open(mut api: ApiClient, session: Session) -> Result<Self, ClientError> {
        let state = session.restore()?;
        api.set_token(state.token().map(str::to_string));
        Ok(Self {
            api,
            session,
            state,
            events: Vec::new(),
        })
    }

    /// Current view.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether the protected view is active.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { .. })
    }

    /// Claims of the logged-in user.
    #[must_use]
    pub fn user(&self) -> Option<&TokenClaims> {
        self.state.claims()
    }

    /// The local feed, as of the last [`EventTracker::feed`] and later updates.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Register an account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns the server's message on rejection, or a network error.
    pub async fn signup(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        Ok(self.api.signup(full_name, email, password).await?.message)
    }

    /// Log in and store the token.
    ///
    /// # Errors
    ///
    /// Returns the server's message on rejection, a network error, or a
    /// token store failure.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserSummary, ClientError> {
        let response = self.api.login(email, password).await?;
        self.state = self.session.start(response.token)?;
        self.api.set_token(self.state.token().map(str::to_string));
        self.events.clear();

        tracing::info!(user_id = response.user.id, "Logged in");
        Ok(response.user)
    }

    /// Drop the stored token and return to the logged-out view.
    ///
    /// The server keeps no session; the token itself stays valid until expiry.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::TokenStore`] if the token store fails.
    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.session.end()?;
        self.state = SessionState::LoggedOut;
        self.api.set_token(None);
        self.events.clear();
        Ok(())
    }

    /// Fetch the event feed.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotLoggedIn`] without a session; otherwise see
    /// [`EventTracker::login`].
    pub async fn feed(&mut self) -> Result<&[Event], ClientError> {
        self.require_session()?;
        let result = self.api.list_events().await;
        self.events = self.guard(result)?;
        Ok(&self.events)
    }

    /// Fetch one event.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotLoggedIn`] without a session; otherwise the API error.
    pub async fn event(&mut self, id: EventId) -> Result<Event, ClientError> {
        self.require_session()?;
        let result = self.api.get_event(id).await;
        let event = self.guard(result)?;
        Ok(self.replace(event))
    }

    /// Create an event and add it to the feed.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotLoggedIn`] without a session; otherwise the API error.
    pub async fn create(&mut self, event: &CreateEvent) -> Result<Event, ClientError> {
        self.require_session()?;
        let result = self.api.create_event(event).await;
        let created = self.guard(result)?;
        self.events.push(created.clone());
        Ok(created)
    }

    /// Comment as the logged-in user's display name.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotLoggedIn`] without a session; otherwise the API error.
    pub async fn comment(&mut self, id: EventId, text: &str) -> Result<Event, ClientError> {
        let author = self.require_session()?.full_name.clone();
        let result = self.api.add_comment(id, &author, text).await;
        let update = self.guard(result)?;
        Ok(self.replace(update.event))
    }

    /// Like (`true`) or unlike (`false`) an event.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotLoggedIn`] without a session; otherwise the API error.
    pub async fn like(&mut self, id: EventId, liked: bool) -> Result<Event, ClientError> {
        self.require_session()?;
        let result = self.api.set_like(id, liked).await;
        let update = self.guard(result)?;
        Ok(self.replace(update.event))
    }

    /// RSVP as the logged-in user.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotLoggedIn`] without a session; otherwise the API error.
    pub async fn attend(
        &mut self,
        id: EventId,
        status: AttendanceStatus,
    ) -> Result<Event, ClientError> {
        let email = self.require_session()?.email.clone();
        let result = self.api.update_attendance(id, Some(&email), status).await;
        let update = self.guard(result)?;
        Ok(self.replace(update.event))
    }

    fn require_session(&self) -> Result<&TokenClaims, ClientError> {
        self.state.claims().ok_or(ClientError::NotLoggedIn)
    }

    // A rejected token sends the client back to the logged-out view.
    fn guard<T>(&mut self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(err) = &result {
            if err.is_auth_failure() {
                tracing::debug!("Server rejected token; clearing session");
                self.logout()?;
            }
        }
        result
    }

    fn replace(&mut self, event: Event) -> Event {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => *slot = event.clone(),
            None => self.events.push(event.clone()),
        }
        event
    }
}
