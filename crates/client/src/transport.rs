//! HTTP connection management for search runs.
//!
//! Responsibilities:
//! - Define the `ConnectionFactory` seam that hands each run its own HTTP client.
//! - Provide the default factory (timeout, redirect limit, optional TLS skip).
//! - Wrap the HTTP client and auth header into a `JobConnection` owned by one run.
//!
//! Does NOT handle:
//! - Classifying responses (see `endpoints::classify`).
//! - Retrying failed requests (there are no retries).
//!
//! Invariants:
//! - Runs never share a `JobConnection`; each asks the factory for its own client.
//! - A `JobConnection` is released exactly once, when its owner drops it.
//! - The factory is injected through the client builder, never through global state.

use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, COOKIE};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Result;
use sumo_config::constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS};

/// Source of HTTP clients for search runs.
pub trait ConnectionFactory: Send + Sync + fmt::Debug {
    /// Create the HTTP client used for one run.
    fn connect(&self) -> Result<Client>;
}

/// Factory building a `reqwest::Client` from endpoint settings.
#[derive(Debug, Clone)]
pub struct DefaultConnectionFactory {
    timeout: Duration,
    skip_verify: bool,
}

impl Default for DefaultConnectionFactory {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            skip_verify: false,
        }
    }
}

impl DefaultConnectionFactory {
    pub fn new(timeout: Duration, skip_verify: bool) -> Self {
        Self {
            timeout,
            skip_verify,
        }
    }
}

impl ConnectionFactory for DefaultConnectionFactory {
    fn connect(&self) -> Result<Client> {
        let mut http_builder = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            http_builder = http_builder.danger_accept_invalid_certs(true);
        }

        Ok(http_builder.build()?)
    }
}

/// HTTP client plus credentials, owned by a single search run.
pub struct JobConnection {
    http: Client,
    auth_header: SecretString,
}

impl JobConnection {
    pub fn new(http: Client, auth_header: SecretString) -> Self {
        Self { http, auth_header }
    }

    /// Start an authenticated GET, replaying the job cookie when present.
    pub(crate) fn get(&self, url: Url, cookie: Option<&str>) -> RequestBuilder {
        let builder = self.authorized(self.http.get(url));
        match cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    /// Start an authenticated POST.
    pub(crate) fn post(&self, url: Url) -> RequestBuilder {
        self.authorized(self.http.post(url))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(AUTHORIZATION, self.auth_header.expose_secret())
            .header(ACCEPT, "application/json")
    }
}

impl fmt::Debug for JobConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobConnection")
            .field("auth_header", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl Drop for JobConnection {
    fn drop(&mut self) {
        debug!("Releasing search job connection");
    }
}
