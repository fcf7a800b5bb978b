//! Search job models.
//!
//! Invariants:
//! - `QuerySpec` times are UTC and are sent without an offset, alongside `timeZone: "UTC"`.
//! - Unknown job states are preserved verbatim in `JobState::Other`.
//! - Counts are accepted as JSON numbers or numeric strings and default to 0.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::serde_helpers::{u64_from_string_or_number, vec_or_null};
use sumo_config::constants::{AUTO_PARSING_MODE, DEFAULT_TIME_ZONE};

/// Timestamp layout expected by the job creation endpoint.
const JOB_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A finished query and the UTC window it runs over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub query: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl QuerySpec {
    pub fn new(query: impl Into<String>, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            query: query.into(),
            from,
            to,
        }
    }

    /// Wire payload for `POST v1/search/jobs`.
    pub fn to_request(&self) -> CreateJobRequest<'_> {
        CreateJobRequest {
            query: &self.query,
            from: self.from.format(JOB_TIME_FORMAT).to_string(),
            to: self.to.format(JOB_TIME_FORMAT).to_string(),
            time_zone: DEFAULT_TIME_ZONE,
            by_receipt_time: false,
            auto_parsing_mode: AUTO_PARSING_MODE,
        }
    }
}

/// Body of the job creation request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest<'a> {
    pub query: &'a str,
    pub from: String,
    pub to: String,
    pub time_zone: &'static str,
    pub by_receipt_time: bool,
    pub auto_parsing_mode: &'static str,
}

/// Service-assigned location of a submitted job plus its session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub location: Url,
    pub cookie: Option<String>,
}

/// State reported by the job status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum JobState {
    NotStarted,
    GatheringResults,
    DoneGatheringResults,
    ForcePaused,
    Cancelled,
    Other(String),
}

impl JobState {
    /// True for states with no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::DoneGatheringResults | Self::ForcePaused | Self::Cancelled
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NotStarted => "NOT STARTED",
            Self::GatheringResults => "GATHERING RESULTS",
            Self::DoneGatheringResults => "DONE GATHERING RESULTS",
            Self::ForcePaused => "FORCE PAUSED",
            Self::Cancelled => "CANCELLED",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for JobState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "NOT STARTED" => Self::NotStarted,
            "GATHERING RESULTS" => Self::GatheringResults,
            "DONE GATHERING RESULTS" => Self::DoneGatheringResults,
            "FORCE PAUSED" => Self::ForcePaused,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Other(s),
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `GET {location}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub state: JobState,
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub message_count: u64,
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub record_count: u64,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub pending_warnings: Vec<String>,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub pending_errors: Vec<String>,
}

impl JobStatus {
    pub fn stats(&self) -> QueryStats {
        QueryStats {
            message_count: self.message_count,
            record_count: self.record_count,
        }
    }
}

/// Row counts captured when the job finished gathering results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryStats {
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub message_count: u64,
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub record_count: u64,
}

impl QueryStats {
    /// Aggregate queries produce records; everything else produces messages.
    pub fn data_type(&self) -> DataType {
        if self.record_count > 0 {
            DataType::Records
        } else {
            DataType::Messages
        }
    }

    /// Number of rows the cursor will page through.
    pub fn total_rows(&self) -> u64 {
        match self.data_type() {
            DataType::Records => self.record_count,
            DataType::Messages => self.message_count,
        }
    }
}

/// Kind of result rows; doubles as path segment and payload key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Messages,
    Records,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Messages => "messages",
            Self::Records => "records",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
