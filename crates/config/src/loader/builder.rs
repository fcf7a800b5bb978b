//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration.
//! - Build and validate the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables when applied after `from_env()`.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

use secrecy::SecretString;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_SECS, MAX_PAGE_SIZE, MAX_POLL_INTERVAL_MS,
    MAX_TIMEOUT_SECS,
};
use crate::types::connection::normalize_api_url;
use crate::types::{AuthConfig, Config, ConnectionConfig};

/// Configuration loader that builds config from environment variables and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    api_url: Option<String>,
    access_id: Option<String>,
    access_key: Option<SecretString>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    poll_interval: Option<Duration>,
    page_size: Option<u64>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            tracing::debug!("DOTENV_DISABLED set, skipping .env loading");
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the API URL.
    pub fn with_api_url(mut self, url: String) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Set the access id.
    pub fn with_access_id(mut self, id: String) -> Self {
        self.access_id = Some(id);
        self
    }

    /// Set the access key.
    pub fn with_access_key(mut self, key: String) -> Self {
        self.access_key = Some(SecretString::new(key.into()));
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the delay between job status polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Set the number of rows requested per page.
    pub fn with_page_size(mut self, size: u64) -> Self {
        self.page_size = Some(size);
        self
    }

    pub(crate) fn set_api_url(&mut self, url: Option<String>) {
        self.api_url = url;
    }

    pub(crate) fn set_access_id(&mut self, id: Option<String>) {
        self.access_id = id;
    }

    pub(crate) fn set_access_key(&mut self, key: Option<SecretString>) {
        self.access_key = key;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_poll_interval(&mut self, interval: Option<Duration>) {
        self.poll_interval = interval;
    }

    pub(crate) fn set_page_size(&mut self, size: Option<u64>) {
        self.page_size = size;
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let api_url = self
            .api_url
            .as_deref()
            .map(validate_and_normalize_api_url)
            .transpose()?
            .ok_or(ConfigError::MissingApiUrl)?;

        let (Some(access_id), Some(access_key)) = (self.access_id, self.access_key) else {
            return Err(ConfigError::MissingCredentials);
        };

        let connection = ConnectionConfig {
            api_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            poll_interval: self
                .poll_interval
                .unwrap_or(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)),
            page_size: self.page_size.unwrap_or(MAX_PAGE_SIZE),
        };

        Self::validate_connection(&connection)?;

        Ok(Config {
            connection,
            auth: AuthConfig {
                access_id,
                access_key,
            },
        })
    }

    /// Validates timeout, poll interval and page size bounds.
    fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }
        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        let poll_ms = connection.poll_interval.as_millis();
        if poll_ms == 0 {
            return Err(ConfigError::InvalidPollInterval {
                message: "poll interval must be greater than 0 milliseconds".to_string(),
            });
        }
        if poll_ms > u128::from(MAX_POLL_INTERVAL_MS) {
            return Err(ConfigError::InvalidPollInterval {
                message: format!(
                    "poll interval exceeds maximum allowed value of {} milliseconds",
                    MAX_POLL_INTERVAL_MS
                ),
            });
        }

        if connection.page_size == 0 || connection.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidPageSize {
                message: format!(
                    "page size must be between 1 and {} (got {})",
                    MAX_PAGE_SIZE, connection.page_size
                ),
            });
        }

        Ok(())
    }
}

/// Validates and normalizes an API URL string.
///
/// Validation rules:
/// - Treat blank/whitespace-only as missing
/// - Parse as an absolute URL with an http(s) scheme and a host
/// - Normalize to exactly one trailing slash
fn validate_and_normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingApiUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "api_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://api.sumologic.com/api/): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "api_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "api_url".into(),
            message: "host is required (e.g. https://api.sumologic.com/api/)".into(),
        });
    }

    Ok(normalize_api_url(parsed.as_str()))
}
