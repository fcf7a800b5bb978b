//! A query bound to a client and a time window.
//!
//! Responsibilities:
//! - Hold the query text, the UTC window and an optional cancellation token.
//! - Normalize caller-supplied times to UTC.
//! - Run the query in typed or field-projection mode.
//!
//! Invariants:
//! - The default window is the last `DEFAULT_WINDOW_MINUTES` minutes, fixed at creation.
//! - `from <= to` is not checked; the service decides what an inverted window means.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};
use serde::de::DeserializeOwned;

use crate::cancellation::CancellationToken;
use crate::client::SumoClient;
use crate::decode::{FieldProjection, TypedRecords};
use crate::error::{ClientError, Result};
use crate::models::{QuerySpec, QueryStats};
use crate::results::ResultSet;
use sumo_config::constants::DEFAULT_WINDOW_MINUTES;

/// A search ready to run against the client it was created from.
#[derive(Debug, Clone)]
pub struct SumoQuery<'a> {
    client: &'a SumoClient,
    text: String,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    cancel: Option<CancellationToken>,
}

impl<'a> SumoQuery<'a> {
    pub(crate) fn new(client: &'a SumoClient, text: String) -> Self {
        let to = Utc::now();
        Self {
            client,
            text,
            from: to - TimeDelta::minutes(DEFAULT_WINDOW_MINUTES),
            to,
            cancel: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Search the window ending now and spanning `span`.
    pub fn for_last(mut self, span: Duration) -> Self {
        let to = Utc::now();
        let span = TimeDelta::from_std(span).unwrap_or(TimeDelta::MAX);
        self.from = to.checked_sub_signed(span).unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.to = to;
        self
    }

    /// Search an explicit window given in any time zone.
    pub fn within<Tz: TimeZone>(mut self, from: DateTime<Tz>, to: DateTime<Tz>) -> Self {
        self.from = from.with_timezone(&Utc);
        self.to = to.with_timezone(&Utc);
        self
    }

    /// Search an explicit window given as local wall-clock times.
    ///
    /// Ambiguous local times resolve to the earlier instant; times skipped by a
    /// daylight-saving transition are rejected.
    pub fn within_local(self, from: NaiveDateTime, to: NaiveDateTime) -> Result<Self> {
        let from = local_to_utc(from)?;
        let to = local_to_utc(to)?;
        Ok(self.within(from, to))
    }

    /// Allow the wait for job completion to be cancelled through `token`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The immutable submission payload for this query.
    pub fn spec(&self) -> QuerySpec {
        QuerySpec::new(self.text.clone(), self.from, self.to)
    }

    /// Run and deserialize each row into `T`.
    pub async fn run<T: DeserializeOwned>(self) -> Result<ResultSet<TypedRecords<T>>> {
        self.client
            .execute(self.spec(), self.cancel.as_ref(), TypedRecords::new())
            .await
    }

    /// Run and project each row onto `fields`, in order.
    pub async fn run_fields<I, S>(self, fields: I) -> Result<ResultSet<FieldProjection>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.client
            .execute(
                self.spec(),
                self.cancel.as_ref(),
                FieldProjection::new(fields),
            )
            .await
    }

    /// Run the job to completion and return only its counts.
    pub async fn stats(self) -> Result<QueryStats> {
        let results = self.run_fields(Vec::<String>::new()).await?;
        Ok(results.stats())
    }
}

fn local_to_utc(naive: NaiveDateTime) -> Result<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| {
            ClientError::InvalidTimeRange(format!(
                "{} does not exist in the local time zone",
                naive
            ))
        })
}
