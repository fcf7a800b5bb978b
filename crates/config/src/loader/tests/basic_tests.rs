//! Basic loader tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test building a config from explicit endpoint and credentials.
//! - Test errors for a missing API URL or missing credentials.
//! - Test default values for optional settings.

use secrecy::ExposeSecret;
use std::time::Duration;

use super::valid_loader;
use crate::constants::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_SECS, MAX_PAGE_SIZE};
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

#[test]
fn test_loader_with_credentials() {
    let config = valid_loader().build().unwrap();

    assert_eq!(config.connection.api_url, "https://api.us2.sumologic.com/api/");
    assert_eq!(config.auth.access_id, "suABC");
    assert_eq!(config.auth.access_key.expose_secret(), "key-123");
}

#[test]
fn test_loader_defaults() {
    let config = valid_loader().build().unwrap();

    assert!(!config.connection.skip_verify);
    assert_eq!(
        config.connection.timeout,
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    );
    assert_eq!(
        config.connection.poll_interval,
        Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
    );
    assert_eq!(config.connection.page_size, MAX_PAGE_SIZE);
}

#[test]
fn test_loader_missing_api_url() {
    let result = ConfigLoader::new()
        .with_access_id("suABC".to_string())
        .with_access_key("key-123".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::MissingApiUrl)));
}

#[test]
fn test_loader_blank_api_url_is_missing() {
    let result = ConfigLoader::new()
        .with_api_url("   ".to_string())
        .with_access_id("suABC".to_string())
        .with_access_key("key-123".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::MissingApiUrl)));
}

#[test]
fn test_loader_missing_access_key() {
    let result = ConfigLoader::new()
        .with_api_url("https://api.sumologic.com/api/".to_string())
        .with_access_id("suABC".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::MissingCredentials)));
}

#[test]
fn test_loader_missing_access_id() {
    let result = ConfigLoader::new()
        .with_api_url("https://api.sumologic.com/api/".to_string())
        .with_access_key("key-123".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::MissingCredentials)));
}

#[test]
fn test_loader_overrides_applied() {
    let config = valid_loader()
        .with_skip_verify(true)
        .with_timeout(Duration::from_secs(90))
        .with_poll_interval(Duration::from_millis(250))
        .with_page_size(25)
        .build()
        .unwrap();

    assert!(config.connection.skip_verify);
    assert_eq!(config.connection.timeout, Duration::from_secs(90));
    assert_eq!(config.connection.poll_interval, Duration::from_millis(250));
    assert_eq!(config.connection.page_size, 25);
}
