//! Read-only view of the email settings, captured once at startup.

use super::secret::SecretString;
use super::types::{EmailConfig, is_blank};

/// Implicit-TLS submission port.
pub const SMTPS_PORT: u16 = 465;

/// SMTP server location and credentials.
///
/// Only built when host, port, username and password are all present, so
/// holding one means the transport is fully configured.
#[derive(Debug, Clone)]
pub struct SmtpCredentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

impl SmtpCredentials {
    /// Implicit TLS is used only on the SMTPS port.
    pub fn secure(&self) -> bool {
        self.port == SMTPS_PORT
    }
}

/// Normalized email settings.
///
/// Absent and empty values collapse into `None`, so each dispatch path gates
/// on a single presence check. The view never changes after construction.
#[derive(Debug, Clone)]
pub struct EmailSettings {
    alert_enabled: bool,
    notify_enabled: bool,
    smtp: Option<SmtpCredentials>,
    from: Option<String>,
    default_to: Option<String>,
}

impl EmailSettings {
    /// Capture the settings from the raw `email` section.
    ///
    /// Emits one summary record when both paths are enabled and fully
    /// configured. The password is always redacted.
    pub fn from_config(config: &EmailConfig) -> Self {
        let smtp = match (
            present(config.host.as_deref()),
            config.port.filter(|p| *p != 0),
            present(config.username.as_deref()),
            config.password.as_ref().filter(|p| !p.is_empty()),
        ) {
            (Some(host), Some(port), Some(username), Some(password)) => Some(SmtpCredentials {
                host: host.to_string(),
                port,
                username: username.to_string(),
                password: password.clone(),
            }),
            _ => None,
        };

        let from = present(config.from.as_deref())
            .or(present(config.username.as_deref()))
            .map(str::to_string);

        let settings = Self {
            alert_enabled: config.alert,
            notify_enabled: config.notify,
            smtp,
            from,
            default_to: present(config.send_to.as_deref()).map(str::to_string),
        };

        if settings.alert_enabled
            && settings.notify_enabled
            && let Some(smtp) = &settings.smtp
            && let Some(default_to) = &settings.default_to
        {
            tracing::info!(
                alert = settings.alert_enabled,
                notify = settings.notify_enabled,
                host = %smtp.host,
                port = smtp.port,
                secure = smtp.secure(),
                username = %smtp.username,
                password = %smtp.password,
                from = ?settings.from,
                send_to = %default_to,
                "Email settings loaded"
            );
        }

        settings
    }

    pub fn alert_enabled(&self) -> bool {
        self.alert_enabled
    }

    pub fn notify_enabled(&self) -> bool {
        self.notify_enabled
    }

    pub fn smtp(&self) -> Option<&SmtpCredentials> {
        self.smtp.as_ref()
    }

    /// Sender address (configured `from`, else the SMTP username).
    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn default_to(&self) -> Option<&str> {
        self.default_to.as_deref()
    }

    /// Sender and recipient for an alert, or `None` when alerts must not be
    /// sent (disabled, SMTP incomplete, or no default recipient).
    pub fn alert_route(&self) -> Option<(&str, &str)> {
        if !self.alert_enabled {
            return None;
        }
        self.smtp.as_ref()?;
        Some((self.from()?, self.default_to()?))
    }

    /// Sender for a notification, or `None` when notifications must not be
    /// sent. The recipient comes from the call, so `default_to` is optional.
    pub fn notification_sender(&self) -> Option<&str> {
        if !self.notify_enabled {
            return None;
        }
        self.smtp.as_ref()?;
        self.from()
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    if is_blank(value) { None } else { value }
}
