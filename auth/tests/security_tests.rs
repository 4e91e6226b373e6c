//! Security-focused integration tests.
//!
//! Verifies the properties the session tokens and password storage rely on:
//!
//! - Tokens signed with another secret are rejected
//! - Tampered claims are rejected
//! - Expiry is enforced with zero leeway
//! - Password hashes never leave the service

#![allow(clippy::unwrap_used)]

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use eventtracker_auth::mocks::MockUserRepository;
use eventtracker_auth::{
    AuthError, AuthService, BcryptHasher, LoginRequest, SignupRequest, TokenIssuer, UserRepository,
};
use eventtracker_testing::{FixedClock, test_clock};
use std::sync::Arc;

fn service_with(secret: &[u8], clock: &FixedClock) -> (AuthService, MockUserRepository) {
    let users = MockUserRepository::new();
    let service = AuthService::new(
        Arc::new(users.clone()),
        Arc::new(BcryptHasher::new(4)),
        Arc::new(TokenIssuer::new(secret, Duration::hours(1), Arc::new(clock.clone()))),
    );
    (service, users)
}

async fn register_and_login(service: &AuthService) -> String {
    service
        .signup(SignupRequest {
            full_name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            password: Some("correct horse".to_string()),
        })
        .await
        .unwrap();

    service
        .login(LoginRequest {
            email: Some("ada@example.com".to_string()),
            password: Some("correct horse".to_string()),
        })
        .await
        .unwrap()
        .token
}

/// A token minted with a different secret must not authenticate.
#[tokio::test]
async fn test_token_from_foreign_secret_rejected() {
    let clock = test_clock();
    let (ours, _) = service_with(b"server-secret", &clock);
    let (theirs, _) = service_with(b"attacker-secret", &clock);

    let forged = register_and_login(&theirs).await;

    assert_eq!(ours.authenticate(Some(&forged)), Err(AuthError::InvalidToken));
}

/// Rewriting the payload (e.g. to impersonate another user) breaks the signature.
#[tokio::test]
async fn test_tampered_payload_rejected() {
    let clock = test_clock();
    let (service, _) = service_with(b"server-secret", &clock);
    let token = register_and_login(&service).await;

    let parts: Vec<&str> = token.split('.').collect();
    let mut claims: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
    claims["email"] = serde_json::json!("admin@example.com");
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    let tampered = format!("{}.{}.{}", parts[0], payload, parts[2]);

    assert_eq!(service.authenticate(Some(&tampered)), Err(AuthError::InvalidToken));
}

/// An unsigned (`alg: none`) token is never accepted.
#[tokio::test]
async fn test_unsigned_token_rejected() {
    let clock = test_clock();
    let (service, _) = service_with(b"server-secret", &clock);
    let token = register_and_login(&service).await;

    let payload = token.split('.').nth(1).unwrap();
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let unsigned = format!("{header}.{payload}.");

    assert_eq!(service.authenticate(Some(&unsigned)), Err(AuthError::InvalidToken));
}

/// A token is valid for one hour and not a second longer.
#[tokio::test]
async fn test_expiry_has_zero_leeway() {
    let clock = test_clock();
    let (service, _) = service_with(b"server-secret", &clock);
    let token = register_and_login(&service).await;

    clock.advance(Duration::minutes(59) + Duration::seconds(59));
    assert!(service.authenticate(Some(&token)).is_ok());

    clock.advance(Duration::seconds(1));
    assert_eq!(service.authenticate(Some(&token)), Err(AuthError::InvalidToken));
}

/// The stored credential is a bcrypt hash, and login output never includes it.
#[tokio::test]
async fn test_password_hash_not_disclosed() {
    let clock = test_clock();
    let (service, users) = service_with(b"server-secret", &clock);
    register_and_login(&service).await;

    let stored = users.find_by_email("ada@example.com").await.unwrap();
    assert!(stored.password_hash.starts_with("$2"));

    let response = service
        .login(LoginRequest {
            email: Some("ada@example.com".to_string()),
            password: Some("correct horse".to_string()),
        })
        .await
        .unwrap();
    let body = serde_json::to_string(&response).unwrap();
    assert!(!body.contains(&stored.password_hash));
    assert!(!format!("{stored:?}").contains(&stored.password_hash));
}

/// A duplicate sign-up never overwrites the existing credential.
#[tokio::test]
async fn test_duplicate_signup_does_not_overwrite() {
    let clock = test_clock();
    let (service, users) = service_with(b"server-secret", &clock);
    register_and_login(&service).await;
    let original = users.find_by_email("ada@example.com").await.unwrap();

    let result = service
        .signup(SignupRequest {
            full_name: Some("Mallory".to_string()),
            email: Some("ada@example.com".to_string()),
            password: Some("takeover".to_string()),
        })
        .await;

    assert_eq!(result, Err(AuthError::EmailTaken));
    assert_eq!(users.find_by_email("ada@example.com").await.unwrap(), original);
}
