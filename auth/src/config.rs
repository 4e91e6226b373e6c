//! Authentication configuration.
//!
//! Values are provided by the application (the server reads them from the
//! environment); nothing here touches the environment directly.

use chrono::Duration;

/// Secret used when none is configured. Only suitable for local development.
pub const DEVELOPMENT_JWT_SECRET: &str = "eventtracker-development-secret";

/// Default token lifetime: one hour.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Default bcrypt cost factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Token and password hashing configuration.
#[derive(Clone)]
pub struct AuthConfig {
    /// Secret for signing tokens (HS256).
    pub jwt_secret: String,

    /// Token lifetime.
    ///
    /// Default: 1 hour
    pub token_ttl: Duration,

    /// bcrypt cost factor.
    ///
    /// Default: 10
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Create configuration with the given signing secret.
    #[must_use]
    pub const fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            token_ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Set token lifetime.
    #[must_use]
    pub const fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Set bcrypt cost factor.
    #[must_use]
    pub const fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Whether the development secret is in use.
    #[must_use]
    pub fn uses_development_secret(&self) -> bool {
        self.jwt_secret == DEVELOPMENT_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new(DEVELOPMENT_JWT_SECRET.to_string())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_builder() {
        let config = AuthConfig::new("s3cret".to_string())
            .with_token_ttl(Duration::minutes(5))
            .with_bcrypt_cost(4);

        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.token_ttl, Duration::minutes(5));
        assert_eq!(config.bcrypt_cost, 4);
        assert!(!config.uses_development_secret());
    }

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl, Duration::hours(1));
        assert_eq!(config.bcrypt_cost, 10);
        assert!(config.uses_development_secret());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::new("s3cret".to_string());
        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
