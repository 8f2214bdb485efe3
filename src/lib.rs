// src/lib.rs
//! roommail - Email notifications for real-time conferencing rooms.
//!
//! The host raises an event (a peer joined, a widget visitor is waiting, an
//! operational alert fired) and [`EmailDispatcher`] renders an HTML email and
//! submits it over SMTP, without ever failing the caller.
//!
//! ```ignore
//! let config = Config::load(Path::new(DEFAULT_CONFIG_PATH))?;
//! let dispatcher = EmailDispatcher::from_config(&config)?;
//! dispatcher.send_email_alert("join", &data);
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod metrics;
pub mod notify;
pub mod template;
pub mod timestamp;

// Re-export commonly used types
pub use config::{Config, EmailSettings, LogFormat};
pub use event::{AlertEvent, NotificationEvent, NotificationOverride, RoomEventData};
pub use logging::init_logging;
pub use crate::metrics::register_metric_descriptions;
pub use notify::{EmailDispatcher, EmailTransport, MailTransport, OutgoingEmail, is_valid_email};
pub use template::{RenderedEmail, TemplateEngine, room_link};
pub use timestamp::{TimestampFormat, current_date_time};
