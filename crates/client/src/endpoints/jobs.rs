//! Search job operations.
//!
//! # What this module handles:
//! - Submitting a search job and capturing its handle
//! - Getting job status
//! - Waiting for the job to reach a terminal state
//!
//! # What this module does NOT handle:
//! - Fetching result pages (see [`super::results`])
//! - Response classification (see [`super::classify`])

use std::time::Duration;

use reqwest::header::{LOCATION, SET_COOKIE};
use tracing::{debug, info, warn};
use url::Url;

use super::check_response;
use crate::auth::redact_query;
use crate::cancellation::CancellationToken;
use crate::error::{ClientError, Result};
use crate::models::{JobHandle, JobState, JobStatus, QuerySpec, QueryStats};
use crate::transport::JobConnection;

/// Submit a search job.
///
/// The returned handle carries the job location (resolved against `jobs_url`
/// when relative) and every `Set-Cookie` value joined with `;`.
pub async fn submit_job(
    conn: &JobConnection,
    jobs_url: &Url,
    spec: &QuerySpec,
) -> Result<JobHandle> {
    // Security: Log only redacted query to avoid exposing sensitive data
    debug!(
        query = %redact_query(&spec.query),
        from = %spec.from,
        to = %spec.to,
        "Submitting search job"
    );

    let response = conn
        .post(jobs_url.clone())
        .json(&spec.to_request())
        .send()
        .await?;
    let response = check_response(response).await?;

    let location = response
        .headers()
        .get(LOCATION)
        .ok_or_else(|| ClientError::unhandled("search job response is missing the Location header"))?
        .to_str()
        .map_err(|e| ClientError::unhandled_with("Location header is not valid text", e))?;
    let location = jobs_url.join(location)?;

    let cookies: Vec<&str> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    let cookie = if cookies.is_empty() {
        None
    } else {
        Some(cookies.join(";"))
    };

    debug!(location = %location, has_cookie = cookie.is_some(), "Search job created");
    Ok(JobHandle { location, cookie })
}

/// Get the status of a search job.
pub async fn get_job_status(conn: &JobConnection, handle: &JobHandle) -> Result<JobStatus> {
    let response = conn
        .get(handle.location.clone(), handle.cookie.as_deref())
        .send()
        .await?;
    let response = check_response(response).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Wait for a search job to finish gathering results.
///
/// Sleeps `poll_interval` before every status request. Cancellation is checked
/// at each iteration boundary and also interrupts the sleep.
pub async fn wait_for_completion(
    conn: &JobConnection,
    handle: &JobHandle,
    poll_interval: Duration,
    cancel: Option<&CancellationToken>,
) -> Result<QueryStats> {
    let mut polls: u64 = 0;

    loop {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            debug!(polls, "Search job wait cancelled");
            return Err(ClientError::Cancelled);
        }

        match cancel {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!(polls, "Search job wait cancelled");
                        return Err(ClientError::Cancelled);
                    }
                    _ = tokio::time::sleep(poll_interval) => {}
                }
            }
            None => tokio::time::sleep(poll_interval).await,
        }

        polls += 1;
        let status = get_job_status(conn, handle).await?;
        debug!(poll = polls, state = %status.state, "Polled search job");

        for warning in &status.pending_warnings {
            warn!(poll = polls, "Search job warning: {}", warning);
        }
        for error in &status.pending_errors {
            warn!(poll = polls, "Search job error: {}", error);
        }

        match status.state {
            JobState::DoneGatheringResults => {
                let stats = status.stats();
                info!(
                    polls,
                    message_count = stats.message_count,
                    record_count = stats.record_count,
                    "Search job completed"
                );
                return Ok(stats);
            }
            JobState::ForcePaused => return Err(ClientError::JobPaused),
            JobState::Cancelled => return Err(ClientError::JobCancelled),
            _ => {}
        }
    }
}
