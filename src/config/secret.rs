//! Redacted holder for the SMTP password.

use serde::Deserialize;
use std::fmt;

/// SMTP password as read from `email.password`.
///
/// Formats as `[REDACTED]` with both `{}` and `{:?}`, so the settings summary
/// log can name the field without leaking it.
///
/// ```
/// use roommail::config::SecretString;
///
/// let password = SecretString::new("smtp-password".to_string());
/// assert_eq!(password.to_string(), "[REDACTED]");
/// assert_eq!(password.expose(), "smtp-password");
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Raw value, for handing to the SMTP authenticator.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

const REDACTED: &str = "[REDACTED]";

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
