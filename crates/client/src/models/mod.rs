//! Data models for the Sumo Logic Search Job API.
//!
//! # What this module handles:
//! - Job submission payloads and the handle returned for a submitted job
//! - Job status, states and the final query statistics
//! - Result page entries and field-projected rows
//!
//! # What this module does NOT handle:
//! - HTTP transport (see [`crate::endpoints`])
//! - Row materialization into caller types (see [`crate::decode`])

mod job;
mod row;

pub use job::{CreateJobRequest, DataType, JobHandle, JobState, JobStatus, QuerySpec, QueryStats};
pub use row::{FieldRow, ResultEntry, ResultPage};
