//! Configuration loading and validation for roommail.
//!
//! This module handles loading the YAML configuration file, validating it,
//! and capturing the read-only email settings used by the dispatcher.

mod secret;
mod settings;
mod types;

pub use secret::SecretString;
pub use settings::{EmailSettings, SMTPS_PORT, SmtpCredentials};
pub use types::{
    AppBrandConfig, BrandConfig, Config, DEFAULT_APP_NAME, DEFAULT_CONFIG_PATH,
    DEFAULT_LISTEN_PORT, EmailConfig, ListenConfig, LogFormat, LoggingConfig, ServerConfig,
    UiConfig,
};

#[cfg(test)]
mod tests;
