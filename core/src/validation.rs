//! Required-field validation for request payloads.
//!
//! Request bodies arrive with every field optional so that a missing field
//! is reported as a validation failure (400) rather than a deserialization
//! rejection. A field that is present but empty counts as missing; whitespace
//! is kept as given.

use thiserror::Error;

/// A request failed input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    /// Create a validation error with a user-facing message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Returns the value if it is present and not blank.
///
/// # Examples
///
/// ```
/// use eventtracker_core::validation::present;
///
/// assert_eq!(present(Some("ada".to_string())), Some("ada".to_string()));
/// assert_eq!(present(Some("   ".to_string())), None);
/// assert_eq!(present(None), None);
/// ```
#[must_use]
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Collects every field in `fields`, failing with `message` if any is missing or empty.
///
/// # Errors
///
/// Returns [`ValidationError`] carrying `message` if at least one field is absent.
///
/// # Examples
///
/// ```
/// use eventtracker_core::validation::require_all;
///
/// let ok = require_all([Some("a".to_string()), Some("b".to_string())], "All fields are required");
/// assert_eq!(ok.unwrap(), ["a".to_string(), "b".to_string()]);
///
/// let err = require_all([Some("a".to_string()), None], "All fields are required");
/// assert_eq!(err.unwrap_err().message(), "All fields are required");
/// ```
pub fn require_all<const N: usize>(
    fields: [Option<String>; N],
    message: &str,
) -> Result<[String; N], ValidationError> {
    if fields.iter().any(|f| f.as_deref().is_none_or(str::is_empty)) {
        return Err(ValidationError::new(message));
    }
    Ok(fields.map(Option::unwrap_or_default))
}
