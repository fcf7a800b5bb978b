//! Search Job API endpoint implementations.
//!
//! Each function performs exactly one kind of round-trip against the service
//! and classifies the response before interpreting it.

mod classify;
mod jobs;
mod results;

pub use classify::{check_response, classify, is_success};
pub use jobs::{get_job_status, submit_job, wait_for_completion};
pub use results::fetch_page;
