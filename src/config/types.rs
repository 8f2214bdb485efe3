//! Core configuration types and loading.

use super::secret::SecretString;
use crate::error::ConfigError;
use lettre::message::Mailbox;
use serde::Deserialize;
use std::path::Path;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/roommail/config.yaml";

/// Application name used in subjects when `ui.brand.app.name` is absent.
pub const DEFAULT_APP_NAME: &str = "MiroTalk SFU";

/// Listening port used for local-domain room links when unset.
pub const DEFAULT_LISTEN_PORT: u16 = 3010;

/// Main configuration structure.
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host server settings (only the listening port is read).
    pub server: ServerConfig,
    /// Branding shown in email subjects.
    pub ui: UiConfig,
    /// SMTP and recipient settings.
    pub email: EmailConfig,
    /// Log output and timestamp formatting.
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: ListenConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_LISTEN_PORT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub brand: BrandConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    pub app: AppBrandConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppBrandConfig {
    pub name: String,
}

impl Default for AppBrandConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
        }
    }
}

/// Raw `email` section as written in the YAML file.
///
/// Fields are kept exactly as configured; normalization into
/// "configured or not" happens in [`EmailSettings`](super::EmailSettings).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Enables `send_email_alert`.
    pub alert: bool,
    /// Enables `send_email_notifications`.
    pub notify: bool,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    /// Sender address, falls back to `username`.
    pub from: Option<String>,
    /// Default recipient for alerts.
    #[serde(rename = "sendTo", alias = "send_to")]
    pub send_to: Option<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format for log aggregation.
    Json,
}

/// Logging configuration.
///
/// `timezone` and `hour12` also drive the timestamp printed in emails.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// IANA timezone name (e.g., "UTC", "Asia/Shanghai").
    pub timezone: String,
    /// 12-hour clock with AM/PM, as the en-US locale does by default.
    pub hour12: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            timezone: "UTC".to_string(),
            hour12: true,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// # Errors
    /// Returns [`ConfigError::LoadError`] if the file cannot be read.
    /// Returns [`ConfigError::ValidationError`] if the YAML is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadError(format!("{}: {}", path.display(), e)))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    /// Returns [`ConfigError::ValidationError`] if the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Display name of the application used in subjects.
    pub fn app_name(&self) -> &str {
        &self.ui.brand.app.name
    }

    /// Port appended to loopback domains in room links.
    pub fn listen_port(&self) -> u16 {
        self.server.listen.port
    }

    /// Validate the configuration, collecting every problem found.
    ///
    /// A configuration that fails validation still produces a working
    /// dispatcher (it simply declines to send); hosts call this at startup
    /// to surface mistakes early.
    ///
    /// # Errors
    /// Returns a `Vec<ConfigError>` containing all validation errors found.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        let email = &self.email;

        if email.alert || email.notify {
            let missing: Vec<&str> = [
                ("host", is_blank(email.host.as_deref())),
                ("port", email.port.unwrap_or(0) == 0),
                ("username", is_blank(email.username.as_deref())),
                (
                    "password",
                    email.password.as_ref().is_none_or(SecretString::is_empty),
                ),
            ]
            .into_iter()
            .filter_map(|(field, absent)| absent.then_some(field))
            .collect();

            if !missing.is_empty() {
                errors.push(ConfigError::ValidationError(format!(
                    "email is enabled but email.{} {} not set",
                    missing.join(", email."),
                    if missing.len() > 1 { "are" } else { "is" }
                )));
            }
        }

        if email.alert && is_blank(email.send_to.as_deref()) {
            errors.push(ConfigError::ValidationError(
                "email.alert is enabled but email.sendTo is not set".to_string(),
            ));
        }

        for (field, value) in [("from", &email.from), ("sendTo", &email.send_to)] {
            if let Some(address) = value.as_deref()
                && !address.trim().is_empty()
                && let Err(e) = address.parse::<Mailbox>()
            {
                errors.push(ConfigError::ValidationError(format!(
                    "email.{} '{}' is not a valid email address: {}",
                    field, address, e
                )));
            }
        }

        if self.logging.timezone.parse::<chrono_tz::Tz>().is_err() {
            errors.push(ConfigError::ValidationError(format!(
                "logging.timezone '{}' is not a valid timezone",
                self.logging.timezone
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
