//! Dispatcher: gates, renders and hands emails to the transport.

use std::sync::Arc;

use crate::config::{Config, EmailSettings};
use crate::error::ConfigError;
use crate::event::{AlertEvent, NotificationEvent, NotificationOverride, RoomEventData};
use crate::metrics::EMAILS_SKIPPED_TOTAL;
use crate::template::{RenderedEmail, TemplateEngine};

use super::is_valid_email;
use super::transport::{EmailTransport, MailTransport, OutgoingEmail, TransportOptions};

/// Public entry point for room event emails.
///
/// Built once at startup and shared read-only. Both send methods return
/// whether an email was handed to the transport, not whether it was
/// delivered; nothing they do can fail the caller.
#[derive(Debug)]
pub struct EmailDispatcher {
    settings: EmailSettings,
    templates: TemplateEngine,
    transport: MailTransport,
}

impl EmailDispatcher {
    /// Create a dispatcher backed by a real SMTP client.
    ///
    /// The transport is built even when email is disabled.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidTransport`] if the SMTP host cannot be
    /// used as a TLS server name.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let options = TransportOptions::from_email_config(&config.email);
        let transport = MailTransport::smtp(&options)?;
        Ok(Self::with_mail_transport(config, transport))
    }

    /// Create a dispatcher with a custom transport.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mock = Arc::new(MockEmailTransport::new());
    /// let dispatcher = EmailDispatcher::with_transport(&config, mock);
    /// ```
    pub fn with_transport(config: &Config, transport: Arc<dyn EmailTransport>) -> Self {
        Self::with_mail_transport(config, MailTransport::new(transport))
    }

    fn with_mail_transport(config: &Config, transport: MailTransport) -> Self {
        Self {
            settings: EmailSettings::from_config(&config.email),
            templates: TemplateEngine::from_config(config),
            transport,
        }
    }

    pub fn settings(&self) -> &EmailSettings {
        &self.settings
    }

    pub fn templates(&self) -> &TemplateEngine {
        &self.templates
    }

    /// Send an alert-path email to the default recipient.
    ///
    /// Recognized events: `join`, `widget`, `alert`. Returns `false` when
    /// alerts are disabled or not fully configured, or when the event is
    /// unknown.
    pub fn send_email_alert(&self, event: &str, data: &RoomEventData) -> bool {
        let Some((from, to)) = self.settings.alert_route() else {
            tracing::debug!(event = %event, "Email alerts disabled or not configured");
            skipped("disabled");
            return false;
        };

        tracing::info!(
            event = %event,
            room_id = %data.room_id,
            peer_name = %data.peer_name,
            "Send email alert"
        );

        let Some(kind) = AlertEvent::parse(event) else {
            tracing::debug!(event = %event, "No email template for event");
            skipped("unknown_event");
            return false;
        };

        let Some(email) = self.render(kind, data) else {
            return false;
        };

        self.transport.send(OutgoingEmail {
            from: from.to_string(),
            to: to.to_string(),
            subject: email.subject,
            html: email.html,
        });
        true
    }

    /// Send a notification-path email to the address in
    /// `notifications.mode.email`.
    ///
    /// Only `join` is recognized. Returns `false` when notifications are
    /// disabled or not configured, the event is unknown, or the recipient is
    /// missing or not a valid address.
    pub fn send_email_notifications(
        &self,
        event: &str,
        data: &RoomEventData,
        notifications: &NotificationOverride,
    ) -> bool {
        let Some(from) = self.settings.notification_sender() else {
            tracing::debug!(event = %event, "Email notifications disabled or not configured");
            skipped("disabled");
            return false;
        };

        let email = NotificationEvent::parse(event).and_then(|kind| self.render(kind.into(), data));
        let recipient = notifications.email();

        match (email, recipient) {
            (Some(email), Some(to)) if is_valid_email(to) => {
                tracing::info!(
                    event = %event,
                    room_id = %data.room_id,
                    to = %to,
                    "Send email notification"
                );
                self.transport.send(OutgoingEmail {
                    from: from.to_string(),
                    to: to.to_string(),
                    subject: email.subject,
                    html: email.html,
                });
                true
            }
            (email, recipient) => {
                tracing::error!(
                    event = %event,
                    recipient = ?recipient,
                    has_message = email.is_some(),
                    "No valid email recipient or message for notification"
                );
                skipped(if email.is_some() {
                    "invalid_recipient"
                } else {
                    "unknown_event"
                });
                false
            }
        }
    }

    /// Render, logging instead of propagating a template failure.
    fn render(&self, event: AlertEvent, data: &RoomEventData) -> Option<RenderedEmail> {
        match self.templates.render(event, data) {
            Ok(email) => Some(email),
            Err(e) => {
                tracing::error!(event = event.as_str(), error = %e, "Failed to render email");
                skipped("render_failed");
                None
            }
        }
    }
}

fn skipped(reason: &'static str) {
    metrics::counter!(EMAILS_SKIPPED_TOTAL, "reason" => reason).increment(1);
}
