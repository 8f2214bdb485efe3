//! Centralized error types for roommail using thiserror.
//!
//! None of these escape the public dispatch entry points: the dispatcher
//! turns every failure into a log record and a `false` return value.

use thiserror::Error;

/// Errors related to configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load config file: {0}")]
    LoadError(String),
    #[error("invalid configuration: {0}")]
    ValidationError(String),
    #[error("invalid smtp transport: {0}")]
    InvalidTransport(String),
}

/// Errors related to building or submitting an email.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("failed to send email: {0}")]
    SendFailed(String),
    #[error("invalid address '{address}': {message}")]
    InvalidAddress { address: String, message: String },
    #[error("failed to build email: {0}")]
    BuildFailed(String),
}

/// Errors related to template rendering.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template '{name}' not found")]
    NotFound { name: String },
    #[error("template render failed: {message}")]
    RenderFailed { message: String },
}

impl From<minijinja::Error> for TemplateError {
    fn from(e: minijinja::Error) -> Self {
        match e.kind() {
            minijinja::ErrorKind::TemplateNotFound => TemplateError::NotFound {
                name: e.name().unwrap_or_default().to_string(),
            },
            _ => TemplateError::RenderFailed {
                message: e.to_string(),
            },
        }
    }
}
