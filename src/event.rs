//! Room events raised by the host and the payloads that come with them.

use serde::Deserialize;

/// Events accepted by `send_email_alert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertEvent {
    /// A participant joined a room.
    Join,
    /// A support-widget visitor is waiting in a room.
    Widget,
    /// An operational alert fired.
    Alert,
}

impl AlertEvent {
    /// Map an event name to a variant. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "join" => Some(Self::Join),
            "widget" => Some(Self::Widget),
            "alert" => Some(Self::Alert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Widget => "widget",
            Self::Alert => "alert",
        }
    }
}

/// Events accepted by `send_email_notifications`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationEvent {
    Join,
}

impl NotificationEvent {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "join" => Some(Self::Join),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Join => "join",
        }
    }
}

impl From<NotificationEvent> for AlertEvent {
    fn from(event: NotificationEvent) -> Self {
        match event {
            NotificationEvent::Join => AlertEvent::Join,
        }
    }
}

/// Payload passed with an event.
///
/// Room events (`join`, `widget`) use the peer and room fields; `alert` uses
/// `body` and the optional `subject`. Missing fields render as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RoomEventData {
    pub peer_name: String,
    pub room_id: String,
    /// Host the participant connected to, possibly with a port.
    pub domain: String,
    pub os: String,
    pub browser: String,
    /// Alert text.
    pub body: String,
    /// Alert subject override.
    pub subject: Option<String>,
}

/// Per-call delivery options for notifications.
///
/// Only `mode.email` is read; any other field is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotificationOverride {
    pub mode: Option<NotificationMode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotificationMode {
    pub email: Option<String>,
}

impl NotificationOverride {
    /// Override holding just a recipient address.
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            mode: Some(NotificationMode {
                email: Some(email.into()),
            }),
        }
    }

    /// Recipient under `mode.email`, if every level is present.
    pub fn email(&self) -> Option<&str> {
        self.mode.as_ref()?.email.as_deref()
    }
}
