//! Client builder for constructing [`SumoClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (api_url, credentials)
//! - Normalizing the API URL (exactly one trailing slash) and deriving the jobs URL
//! - Choosing the connection factory (default or injected)
//!
//! # What this module does NOT handle:
//! - Running searches (handled by [`SumoClient`] and `SumoQuery`)
//! - Loading configuration from the environment (handled by `sumo-config`)
//!
//! # Invariants
//! - `api_url`, `access_id` and `access_key` are required before calling `build()`
//! - The page size is clamped to `1..=MAX_PAGE_SIZE`
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::auth::basic_auth_header;
use crate::client::SumoClient;
use crate::error::{ClientError, Result};
use crate::transport::{ConnectionFactory, DefaultConnectionFactory};
use sumo_config::{
    Config,
    constants::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_SECS, MAX_PAGE_SIZE, SEARCH_JOBS_PATH},
};

/// Builder for creating a new [`SumoClient`].
///
/// All options have defaults except the API URL and the access id/key pair.
///
/// # Example
///
/// ```rust,ignore
/// use sumo_client::SumoClient;
///
/// let client = SumoClient::builder()
///     .api_url("https://api.sumologic.com/api/".to_string())
///     .access_id("suABC".to_string())
///     .access_key("secret".to_string())
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// ```
pub struct SumoClientBuilder {
    api_url: Option<String>,
    access_id: Option<String>,
    access_key: Option<SecretString>,
    skip_verify: bool,
    timeout: Duration,
    poll_interval: Duration,
    page_size: u64,
    factory: Option<Arc<dyn ConnectionFactory>>,
}

impl Default for SumoClientBuilder {
    fn default() -> Self {
        Self {
            api_url: None,
            access_id: None,
            access_key: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            page_size: MAX_PAGE_SIZE,
            factory: None,
        }
    }
}

impl SumoClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL, e.g. `https://api.us2.sumologic.com/api/`.
    ///
    /// A trailing slash is added when missing.
    pub fn api_url(mut self, url: String) -> Self {
        self.api_url = Some(url);
        self
    }

    pub fn access_id(mut self, id: String) -> Self {
        self.access_id = Some(id);
        self
    }

    pub fn access_key(mut self, key: String) -> Self {
        self.access_key = Some(SecretString::new(key.into()));
        self
    }

    /// Set the access id and an already-wrapped access key.
    pub fn credentials(mut self, id: String, key: SecretString) -> Self {
        self.access_id = Some(id);
        self.access_key = Some(key);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the per-request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the delay between job status polls. Default is one second.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the number of rows requested per page (at most 100).
    pub fn page_size(mut self, size: u64) -> Self {
        self.page_size = size;
        self
    }

    /// Replace the source of HTTP clients used by each run.
    ///
    /// When set, `timeout` and `skip_verify` are the factory's responsibility.
    pub fn connection_factory(mut self, factory: Arc<dyn ConnectionFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Create a client builder from loaded configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = ConfigLoader::new().from_env()?.build()?;
    /// let client = SumoClient::builder().from_config(&config).build()?;
    /// ```
    pub fn from_config(self, config: &Config) -> Self {
        let connection = &config.connection;
        self.api_url(connection.api_url.clone())
            .credentials(
                config.auth.access_id.clone(),
                config.auth.access_key.clone(),
            )
            .skip_verify(connection.skip_verify)
            .timeout(connection.timeout)
            .poll_interval(connection.poll_interval)
            .page_size(connection.page_size)
    }

    /// Build the client.
    ///
    /// # Errors
    /// - `InvalidUrl` if the API URL is missing or not an absolute URL
    /// - `MissingCredentials` if the access id or key is missing
    pub fn build(self) -> Result<SumoClient> {
        let raw = self
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ClientError::InvalidUrl("API URL is required".to_string()))?;

        let api_url = Url::parse(&format!("{}/", raw.trim_end_matches('/')))
            .map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "{raw}: scheme must be http or https"
            )));
        }
        let jobs_url = api_url
            .join(SEARCH_JOBS_PATH)
            .map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;

        let (Some(access_id), Some(access_key)) = (self.access_id, self.access_key) else {
            return Err(ClientError::MissingCredentials);
        };

        if self.skip_verify && api_url.scheme() == "http" {
            tracing::warn!(
                "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
            );
        }

        let page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        if page_size != self.page_size {
            tracing::warn!(
                requested = self.page_size,
                page_size,
                "Page size out of range, clamped"
            );
        }

        let factory = self.factory.unwrap_or_else(|| {
            Arc::new(DefaultConnectionFactory::new(self.timeout, self.skip_verify))
        });

        Ok(SumoClient {
            api_url,
            jobs_url,
            auth_header: basic_auth_header(&access_id, &access_key),
            poll_interval: self.poll_interval,
            page_size,
            factory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> SumoClientBuilder {
        SumoClient::builder()
            .access_id("suTEST".to_string())
            .access_key("secret".to_string())
    }

    #[test]
    fn test_client_builder_requires_api_url() {
        let result = builder().build();
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_client_builder_blank_api_url() {
        let result = builder().api_url("   ".to_string()).build();
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_client_builder_requires_credentials() {
        let result = SumoClient::builder()
            .api_url("https://api.sumologic.com/api/".to_string())
            .access_id("suTEST".to_string())
            .build();
        assert!(matches!(result, Err(ClientError::MissingCredentials)));
    }

    #[test]
    fn test_client_builder_rejects_relative_url() {
        let result = builder().api_url("not a url".to_string()).build();
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_client_builder_rejects_non_http_scheme() {
        let result = builder().api_url("ftp://api.sumologic.com/api".to_string()).build();
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_jobs_url_joins_under_api_path() {
        let client = builder()
            .api_url("https://api.us2.sumologic.com/api".to_string())
            .build()
            .unwrap();
        assert_eq!(client.api_url().as_str(), "https://api.us2.sumologic.com/api/");
        assert_eq!(
            client.jobs_url().as_str(),
            "https://api.us2.sumologic.com/api/v1/search/jobs"
        );
    }

    #[test]
    fn test_trailing_slashes_collapse() {
        let client = builder()
            .api_url("https://api.sumologic.com/api///".to_string())
            .build()
            .unwrap();
        assert_eq!(
            client.jobs_url().as_str(),
            "https://api.sumologic.com/api/v1/search/jobs"
        );
    }

    #[test]
    fn test_page_size_clamped() {
        let client = builder()
            .api_url("https://api.sumologic.com/api/".to_string())
            .page_size(500)
            .build()
            .unwrap();
        assert_eq!(client.page_size(), MAX_PAGE_SIZE);

        let client = builder()
            .api_url("https://api.sumologic.com/api/".to_string())
            .page_size(0)
            .build()
            .unwrap();
        assert_eq!(client.page_size(), 1);
    }

    #[test]
    fn test_defaults() {
        let client = builder()
            .api_url("https://api.sumologic.com/api/".to_string())
            .build()
            .unwrap();
        assert_eq!(
            client.poll_interval(),
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
        );
        assert_eq!(client.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_skip_verify_with_http_url() {
        let client = builder()
            .api_url("http://localhost:8080/api/".to_string())
            .skip_verify(true)
            .build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::new("https://api.eu.sumologic.com/api/", "suCFG", "cfgkey");
        config.connection.page_size = 25;
        config.connection.poll_interval = Duration::from_millis(250);

        let client = SumoClient::builder().from_config(&config).build().unwrap();
        assert_eq!(
            client.jobs_url().as_str(),
            "https://api.eu.sumologic.com/api/v1/search/jobs"
        );
        assert_eq!(client.page_size(), 25);
        assert_eq!(client.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_debug_does_not_expose_credentials() {
        let client = builder()
            .api_url("https://api.sumologic.com/api/".to_string())
            .build()
            .unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret"));
        assert!(!debug.contains("Basic"));
    }
}
