//! Search client and run orchestration.
//!
//! Responsibilities:
//! - Hold the endpoint, precomputed credentials and run settings.
//! - Create queries (`query`, `query_builder`).
//! - Drive one run: connect, submit, wait for completion, open the cursor.
//!
//! Does NOT handle:
//! - HTTP request details (see `endpoints`).
//! - Row decoding (see `decode`).
//!
//! Invariants:
//! - `SumoClient` holds no per-run state and can start any number of runs.
//! - Each run owns its own `JobConnection`, released by the returned `ResultSet`
//!   or immediately when the run fails before producing one.

mod builder;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

pub use builder::SumoClientBuilder;

use crate::cancellation::CancellationToken;
use crate::cursor::ResultCursor;
use crate::decode::RowDecoder;
use crate::endpoints;
use crate::error::Result;
use crate::models::QuerySpec;
use crate::query::{QueryBuilder, SumoQuery};
use crate::results::ResultSet;
use crate::transport::{ConnectionFactory, JobConnection};

/// Client for the search job API.
pub struct SumoClient {
    api_url: Url,
    jobs_url: Url,
    auth_header: SecretString,
    poll_interval: Duration,
    page_size: u64,
    factory: Arc<dyn ConnectionFactory>,
}

impl SumoClient {
    /// Create a new client builder.
    pub fn builder() -> SumoClientBuilder {
        SumoClientBuilder::new()
    }

    /// Start a query for `text` over the default window.
    pub fn query(&self, text: impl Into<String>) -> SumoQuery<'_> {
        SumoQuery::new(self, text.into())
    }

    /// Start building query text.
    pub fn query_builder(&self) -> QueryBuilder {
        QueryBuilder::new()
    }

    /// Base API URL, always ending with `/`.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// URL that search jobs are submitted to.
    pub fn jobs_url(&self) -> &Url {
        &self.jobs_url
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub(crate) async fn execute<D: RowDecoder>(
        &self,
        spec: QuerySpec,
        cancel: Option<&CancellationToken>,
        decoder: D,
    ) -> Result<ResultSet<D>> {
        let conn = JobConnection::new(self.factory.connect()?, self.auth_header.clone());

        let handle = endpoints::submit_job(&conn, &self.jobs_url, &spec).await?;

        let stats =
            endpoints::wait_for_completion(&conn, &handle, self.poll_interval, cancel).await?;

        let cursor = ResultCursor::new(conn, handle, &stats, self.page_size, decoder);
        Ok(ResultSet::new(stats, cursor))
    }
}

impl fmt::Debug for SumoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SumoClient")
            .field("api_url", &self.api_url.as_str())
            .field("poll_interval", &self.poll_interval)
            .field("page_size", &self.page_size)
            .field("factory", &self.factory)
            .finish_non_exhaustive()
    }
}
