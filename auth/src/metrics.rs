//! Auth counters.
//!
//! Recorded through the `metrics` facade; the server installs the
//! Prometheus recorder.

/// Successful sign-ups.
pub const SIGNUPS_TOTAL: &str = "eventtracker_signups_total";

/// Login attempts, labelled by `outcome`.
pub const LOGINS_TOTAL: &str = "eventtracker_logins_total";

/// Outcome label for [`LOGINS_TOTAL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Token issued.
    Success,
    /// Password mismatch.
    InvalidCredentials,
    /// No such email.
    UnknownUser,
}

impl LoginOutcome {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::InvalidCredentials => "invalid_credentials",
            Self::UnknownUser => "unknown_user",
        }
    }
}

/// Register counter descriptions with the installed recorder.
pub fn describe() {
    metrics::describe_counter!(SIGNUPS_TOTAL, "Users registered");
    metrics::describe_counter!(LOGINS_TOTAL, "Login attempts by outcome");
}

pub(crate) fn record_signup() {
    metrics::counter!(SIGNUPS_TOTAL).increment(1);
}

pub(crate) fn record_login(outcome: LoginOutcome) {
    metrics::counter!(LOGINS_TOTAL, "outcome" => outcome.as_str()).increment(1);
}
