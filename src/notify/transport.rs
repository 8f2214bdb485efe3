//! SMTP submission behind a small trait.
//!
//! # Testability
//!
//! The dispatcher only ever talks to [`EmailTransport`]:
//! - Production: [`SmtpTransport`] wrapping `AsyncSmtpTransport<Tokio1Executor>`
//! - Testing: a recording mock injected through [`MailTransport::new`]

use crate::config::{EmailConfig, SMTPS_PORT, SecretString};
use crate::error::{ConfigError, NotifyError};
use crate::metrics::{EMAILS_FAILED_TOTAL, EMAILS_SENT_TOTAL};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

/// Host used when no SMTP host is configured. The transport is still built
/// so the handle always exists, but the dispatcher never sends through it.
const UNCONFIGURED_HOST: &str = "localhost";

/// Port used when no SMTP port is configured.
const UNCONFIGURED_PORT: u16 = 25;

/// One HTML email, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Async email transport abstraction.
///
/// Allows injecting mock transports in tests while using the real
/// `AsyncSmtpTransport` in production.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Submit one email.
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), NotifyError>;
}

/// Options the SMTP client is built from.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub host: String,
    pub port: u16,
    /// Implicit TLS from the first byte (SMTPS). Derived from the port.
    pub secure: bool,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

impl TransportOptions {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: Option<String>,
        password: Option<SecretString>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            secure: port == SMTPS_PORT,
            username,
            password,
        }
    }

    /// Options from the raw `email` section, whatever its state.
    pub fn from_email_config(config: &EmailConfig) -> Self {
        let host = config
            .host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .unwrap_or(UNCONFIGURED_HOST);
        let port = config
            .port
            .filter(|p| *p != 0)
            .unwrap_or(UNCONFIGURED_PORT);

        Self::new(host, port, config.username.clone(), config.password.clone())
    }
}

/// Real SMTP transport wrapper implementing `EmailTransport`.
pub struct SmtpTransport {
    inner: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    /// Build the lettre client. No connection is opened here.
    ///
    /// Port 465 wraps the connection in TLS immediately; other ports start
    /// in cleartext and upgrade with STARTTLS when the server offers it.
    pub fn from_options(options: &TransportOptions) -> Result<Self, ConfigError> {
        let tls_parameters = TlsParameters::new(options.host.clone())
            .map_err(|e| ConfigError::InvalidTransport(format!("TLS configuration error: {}", e)))?;

        let tls = if options.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&options.host)
            .port(options.port)
            .tls(tls);

        let builder = match (&options.username, &options.password) {
            (Some(user), Some(pass)) => {
                builder.credentials(Credentials::new(user.clone(), pass.expose().to_string()))
            }
            _ => builder,
        };

        Ok(Self {
            inner: builder.build(),
        })
    }
}

#[async_trait]
impl EmailTransport for SmtpTransport {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), NotifyError> {
        let message = build_message(email)?;
        self.inner
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| NotifyError::SendFailed(e.to_string()))
    }
}

/// Build a single-part HTML message.
pub fn build_message(email: &OutgoingEmail) -> Result<Message, NotifyError> {
    let from = parse_mailbox(&email.from)?;
    let to = parse_mailbox(&email.to)?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())
        .map_err(|e| NotifyError::BuildFailed(e.to_string()))
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address.parse().map_err(|e| NotifyError::InvalidAddress {
        address: address.to_string(),
        message: format!("{}", e),
    })
}

/// Fire-and-forget handle the dispatcher sends through.
///
/// `send` returns immediately; delivery runs on the current tokio runtime
/// and its outcome is only logged.
#[derive(Clone)]
pub struct MailTransport {
    inner: Arc<dyn EmailTransport>,
}

impl MailTransport {
    /// Wrap any transport (used to inject mocks).
    pub fn new(inner: Arc<dyn EmailTransport>) -> Self {
        Self { inner }
    }

    /// Handle backed by a real SMTP client.
    pub fn smtp(options: &TransportOptions) -> Result<Self, ConfigError> {
        tracing::debug!(
            host = %options.host,
            port = options.port,
            secure = options.secure,
            "Building SMTP transport"
        );
        Ok(Self::new(Arc::new(SmtpTransport::from_options(options)?)))
    }

    /// Hand the email off for delivery without waiting for it.
    pub fn send(&self, email: OutgoingEmail) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(to = %email.to, error = %e, "No async runtime, email not sent");
                metrics::counter!(EMAILS_FAILED_TOTAL).increment(1);
                return;
            }
        };

        let inner = Arc::clone(&self.inner);
        handle.spawn(async move {
            deliver(inner.as_ref(), &email).await;
        });
    }
}

/// Submit and log the outcome. Errors stop here.
async fn deliver(transport: &dyn EmailTransport, email: &OutgoingEmail) {
    match transport.send_email(email).await {
        Ok(()) => {
            tracing::info!(to = %email.to, subject = %email.subject, "Email sent");
            metrics::counter!(EMAILS_SENT_TOTAL).increment(1);
        }
        Err(e) => {
            tracing::error!(to = %email.to, error = %e, "Failed to send email");
            metrics::counter!(EMAILS_FAILED_TOTAL).increment(1);
        }
    }
}

impl std::fmt::Debug for MailTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailTransport").finish_non_exhaustive()
    }
}
