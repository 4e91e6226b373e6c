//! HTTP client for the event tracker API

use crate::error::{ClientError, FALLBACK_ERROR_MESSAGE};
use crate::types::{
    AttendBody, CommentBody, CreateEvent, ErrorBody, EventUpdate, LikeBody, LoginBody,
    LoginResponse, MessageResponse, SignupBody, TokenClaims,
};
use eventtracker_core::{AttendanceStatus, Event, EventId};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Default server address.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Event tracker API client
///
/// One method per endpoint. A bearer token is attached to every request
/// once [`ApiClient::set_token`] has been called.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the server at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a session token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace (or clear) the session token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// The session token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Server address without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /auth/signup`
    ///
    /// # Errors
    ///
    /// Returns the server's message on 4xx/5xx, or a network error.
    pub async fn signup(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<MessageResponse, ClientError> {
        let body = SignupBody {
            full_name,
            email,
            password,
        };
        self.send(self.client.post(self.url("/auth/signup")).json(&body))
            .await
    }

    /// `POST /auth/login`
    ///
    /// Does not store the returned token; see [`ApiClient::set_token`].
    ///
    /// # Errors
    ///
    /// Returns the server's message on 4xx/5xx, or a network error.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginBody { email, password };
        self.send(self.client.post(self.url("/auth/login")).json(&body))
            .await
    }

    /// `GET /auth/me`
    ///
    /// # Errors
    ///
    /// Returns the server's message on 4xx/5xx, or a network error.
    pub async fn me(&self) -> Result<TokenClaims, ClientError> {
        self.send(self.authorized(self.client.get(self.url("/auth/me"))))
            .await
    }

    /// `GET /api/events`
    ///
    /// # Errors
    ///
    /// Returns the server's message on 4xx/5xx, or a network error.
    pub async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        self.send(self.authorized(self.client.get(self.url("/api/events"))))
            .await
    }

    /// `POST /api/events`
    ///
    /// # Errors
    ///
    /// Returns the server's message on 4xx/5xx, or a network error.
    pub async fn create_event(&self, event: &CreateEvent) -> Result<Event, ClientError> {
        let request = self.client.post(self.url("/api/events")).json(event);
        self.send(self.authorized(request)).await
    }

    /// `GET /api/events/:id`
    ///
    /// # Errors
    ///
    /// Returns the server's message on 4xx/5xx, or a network error.
    pub async fn get_event(&self, id: EventId) -> Result<Event, ClientError> {
        let request = self.client.get(self.url(&format!("/api/events/{id}")));
        self.send(self.authorized(request)).await
    }

    /// `POST /api/events/:id/comments`
    ///
    /// # Errors
    ///
    /// Returns the server's message on 4xx/5xx, or a network error.
    pub async fn add_comment(
        &self,
        id: EventId,
        user: &str,
        text: &str,
    ) -> Result<EventUpdate, ClientError> {
        let request = self
            .client
            .post(self.url(&format!("/api/events/{id}/comments")))
            .json(&CommentBody { user, text });
        self.send(self.authorized(request)).await
    }

    /// `PUT /api/events/:id/like`
    ///
    /// # Errors
    ///
    /// Returns the server's message on 4xx/5xx, or a network error.
    pub async fn set_like(&self, id: EventId, liked: bool) -> Result<EventUpdate, ClientError> {
        let request = self
            .client
            .put(self.url(&format!("/api/events/{id}/like")))
            .json(&LikeBody { liked });
        self.send(self.authorized(request)).await
    }

    /// `PUT /api/events/:id/attend`
    ///
    /// `email` defaults to the token's email on the server when `None`.
    ///
    /// # Errors
    ///
    /// Returns the server's message on 4xx/5xx, or a network error.
    pub async fn update_attendance(
        &self,
        id: EventId,
        email: Option<&str>,
        status: AttendanceStatus,
    ) -> Result<EventUpdate, ClientError> {
        let request = self
            .client
            .put(self.url(&format!("/api/events/{id}/attend")))
            .json(&AttendBody { email, status });
        self.send(self.authorized(request)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::ResponseParseFailed(e.to_string()));
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => FALLBACK_ERROR_MESSAGE.to_string(),
        };
        tracing::debug!(status = status.as_u16(), %message, "API request failed");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
