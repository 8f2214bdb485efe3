//! Integration tests for Config loading and validation.

use super::*;
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

// ============================================================
// Config Loading Tests
// ============================================================

#[test]
fn load_valid_config() {
    let config = Config::load(&fixture_path("config_valid.yaml")).unwrap();

    assert_eq!(config.listen_port(), 8080);
    assert_eq!(config.app_name(), "Acme Meet");

    let email = &config.email;
    assert!(email.alert);
    assert!(email.notify);
    assert_eq!(email.host.as_deref(), Some("smtp.example.com"));
    assert_eq!(email.port, Some(587));
    assert_eq!(email.username.as_deref(), Some("mailer@example.com"));
    assert_eq!(
        email.password.as_ref().map(SecretString::expose),
        Some("app-password")
    );
    assert_eq!(
        email.from.as_deref(),
        Some("Acme Meet <no-reply@example.com>")
    );
    assert_eq!(email.send_to.as_deref(), Some("ops@example.com"));

    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.timezone, "Asia/Shanghai");
    assert!(!config.logging.hour12);

    assert!(config.validate().is_ok());
}

#[test]
fn minimal_config_takes_defaults() {
    let config = Config::load(&fixture_path("config_minimal.yaml")).unwrap();

    assert_eq!(config.app_name(), DEFAULT_APP_NAME);
    assert_eq!(config.listen_port(), DEFAULT_LISTEN_PORT);
    assert!(!config.email.alert);
    assert!(!config.email.notify);
    assert!(config.email.host.is_none());
    assert_eq!(config.logging.format, LogFormat::Text);
    assert_eq!(config.logging.timezone, "UTC");
    assert!(config.logging.hour12);

    // Disabled email needs no SMTP settings.
    assert!(config.validate().is_ok());
}

#[test]
fn load_nonexistent_file_returns_load_error() {
    let result = Config::load(std::path::Path::new("/nonexistent/path/config.yaml"));
    match result.unwrap_err() {
        crate::error::ConfigError::LoadError(msg) => {
            assert!(msg.contains("/nonexistent/path/config.yaml"));
        }
        e => panic!("Expected LoadError, got {:?}", e),
    }
}

#[test]
fn load_invalid_yaml_returns_validation_error() {
    let result = Config::load(&fixture_path("config_invalid_yaml.yaml"));
    match result.unwrap_err() {
        crate::error::ConfigError::ValidationError(_) => {}
        e => panic!("Expected ValidationError, got {:?}", e),
    }
}

#[test]
fn load_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "email:\n  notify: true\n  host: smtp.x\n  port: 25\n  username: u\n  password: p"
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert!(config.email.notify);
    assert_eq!(config.email.port, Some(25));
    assert!(config.email.send_to.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn send_to_accepts_snake_case_alias() {
    let config = Config::from_yaml("email:\n  send_to: ops@example.com").unwrap();
    assert_eq!(config.email.send_to.as_deref(), Some("ops@example.com"));
}

#[test]
fn default_config_path_is_correct() {
    assert_eq!(DEFAULT_CONFIG_PATH, "/etc/roommail/config.yaml");
}

#[test]
fn config_example_yaml_is_valid() {
    let example_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("config.example.yaml");

    let config = Config::load(&example_path).expect("config.example.yaml should be valid");
    assert!(config.validate().is_ok());
}

// ============================================================
// Validation Tests
// ============================================================

#[test]
fn validate_collects_all_errors() {
    let config = Config::load(&fixture_path("config_incomplete_smtp.yaml")).unwrap();

    let errors = config.validate().unwrap_err();
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();

    assert_eq!(errors.len(), 4, "got: {:?}", messages);
    assert!(
        messages
            .iter()
            .any(|m| m.contains("email.port") && m.contains("email.password"))
    );
    assert!(messages.iter().any(|m| m.contains("sendTo is not set")));
    assert!(messages.iter().any(|m| m.contains("email.from 'not an address'")));
    assert!(messages.iter().any(|m| m.contains("Mars/Olympus_Mons")));
}

#[test]
fn validate_rejects_invalid_send_to() {
    let config = Config::from_yaml("email:\n  sendTo: nobody").unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("email.sendTo 'nobody'"));
}

#[test]
fn validate_notify_without_send_to_is_ok() {
    let config = Config::from_yaml(
        "email:\n  notify: true\n  host: smtp.x\n  port: 587\n  username: u\n  password: p",
    )
    .unwrap();
    assert!(config.validate().is_ok());
}

#[test]
fn validate_single_missing_field_uses_singular() {
    let config = Config::from_yaml(
        "email:\n  notify: true\n  host: smtp.x\n  port: 587\n  username: u",
    )
    .unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "invalid configuration: email is enabled but email.password is not set"
    );
}
