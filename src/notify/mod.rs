//! Email notification system for room events.
//!
//! # Architecture
//!
//! ```text
//! host -> mailer.rs -> template.rs -> transport.rs -> SMTP server
//! ```
//!
//! - **Dispatcher** (`EmailDispatcher`): gating, event mapping, recipients
//! - **Transport** (`MailTransport`): fire-and-forget submission; failures
//!   are logged and never reach the caller
//!
//! There is no queue and no retry: one call produces at most one email.

pub mod mailer;
pub mod transport;

pub use mailer::EmailDispatcher;
pub use transport::{
    EmailTransport, MailTransport, OutgoingEmail, SmtpTransport, TransportOptions, build_message,
};

/// Check that `address` is a bare `local@domain` email address.
///
/// Display-name forms such as `Ann <ann@example.com>` are rejected; the
/// notification override must carry the address alone.
pub fn is_valid_email(address: &str) -> bool {
    address.parse::<lettre::Address>().is_ok()
}
