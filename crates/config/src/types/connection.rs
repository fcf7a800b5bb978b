//! Endpoint configuration types.
//!
//! Responsibilities:
//! - Define endpoint settings (API URL, TLS verification, timeouts, polling, paging).
//! - Define the main `Config` structure combining endpoint and credentials.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Configuration loading from env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - `api_url` always ends with a single `/` so relative API paths join beneath it.
//! - `timeout` is serialized as seconds, `poll_interval` as milliseconds.
//! - Default values come from `constants`, not magic numbers.

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_SECS, MAX_PAGE_SIZE,
};
use crate::types::auth::AuthConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Module for serializing Duration as milliseconds (integer).
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Connection configuration for the Sumo Logic API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// API root for the deployment (e.g., https://api.sumologic.com/api/)
    pub api_url: String,
    /// Whether to skip TLS verification (for intercepting proxies in development)
    pub skip_verify: bool,
    /// Per-request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Fixed delay between job status polls (serialized as milliseconds)
    #[serde(with = "duration_millis", default = "default_poll_interval")]
    pub poll_interval: Duration,
    /// Rows requested per page, at most 100
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

pub(crate) fn default_poll_interval() -> Duration {
    Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
}

pub(crate) fn default_page_size() -> u64 {
    MAX_PAGE_SIZE
}

impl ConnectionConfig {
    /// Endpoint settings for `api_url` with every other field defaulted.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_api_url(&api_url.into()),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: default_poll_interval(),
            page_size: default_page_size(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Ensure the API URL ends with exactly one trailing slash.
pub(crate) fn normalize_api_url(url: &str) -> String {
    format!("{}/", url.trim().trim_end_matches('/'))
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint settings
    pub connection: ConnectionConfig,
    /// Credentials
    pub auth: AuthConfig,
}

impl Config {
    /// Create a config for the given API URL and key pair.
    pub fn new(
        api_url: impl Into<String>,
        access_id: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        Self {
            connection: ConnectionConfig::new(api_url),
            auth: AuthConfig::new(access_id, access_key),
        }
    }

    /// Copy of this config pointing at the same endpoint with other credentials.
    pub fn with_credentials(
        &self,
        access_id: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        Self {
            connection: self.connection.clone(),
            auth: AuthConfig::new(access_id, access_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_connection_config() {
        let connection = ConnectionConfig::default();
        assert_eq!(connection.api_url, "https://api.sumologic.com/api/");
        assert!(!connection.skip_verify);
        assert_eq!(connection.poll_interval, Duration::from_secs(1));
        assert_eq!(connection.page_size, 100);
    }

    #[test]
    fn test_api_url_gets_single_trailing_slash() {
        assert_eq!(
            ConnectionConfig::new("https://api.eu.sumologic.com/api").api_url,
            "https://api.eu.sumologic.com/api/"
        );
        assert_eq!(
            ConnectionConfig::new("https://api.eu.sumologic.com/api//").api_url,
            "https://api.eu.sumologic.com/api/"
        );
    }

    #[test]
    fn test_with_credentials_keeps_endpoint() {
        let config = Config::new("https://api.us2.sumologic.com/api", "id-1", "key-1");
        let other = config.with_credentials("id-2", "key-2");

        assert_eq!(other.connection.api_url, config.connection.api_url);
        assert_eq!(other.auth.access_id, "id-2");
        assert_eq!(other.auth.access_key.expose_secret(), "key-2");
        assert_eq!(config.auth.access_id, "id-1");
    }

    #[test]
    fn test_connection_config_serde_units() {
        let mut connection = ConnectionConfig::new("https://api.sumologic.com/api/");
        connection.timeout = Duration::from_secs(60);
        connection.poll_interval = Duration::from_millis(250);

        let json = serde_json::to_value(&connection).unwrap();
        assert_eq!(json["timeout"], 60);
        assert_eq!(json["poll_interval"], 250);

        let parsed: ConnectionConfig = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.timeout, Duration::from_secs(60));
        assert_eq!(parsed.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_connection_config_missing_optional_fields_use_defaults() {
        let json = serde_json::json!({
            "api_url": "https://api.sumologic.com/api/",
            "skip_verify": false,
            "timeout": 30
        });
        let parsed: ConnectionConfig = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.poll_interval, Duration::from_millis(1000));
        assert_eq!(parsed.page_size, 100);
    }

    #[test]
    fn test_config_debug_does_not_expose_secrets() {
        let config = Config::new("https://api.sumologic.com/api", "su-id", "my-secret-key");
        let debug_output = format!("{:?}", config);

        assert!(!debug_output.contains("my-secret-key"));
        assert!(debug_output.contains("su-id"));
    }
}
