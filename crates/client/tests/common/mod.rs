//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the search client. All integration tests should use
//! these utilities to ensure consistency.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - The mock API lives under `/api/`, so jobs are submitted to `/api/v1/search/jobs`
//!
//! # What this does NOT handle
//! - Test-specific assertions or test logic

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};

// Re-export test utilities from sumo-client
#[allow(unused_imports)]
pub use sumo_client::testing::load_fixture;

// Re-export commonly used types for test convenience
// These are used via `use common::*;` in test files
#[allow(unused_imports)]
pub use sumo_client::{CancellationToken, ClientError, ErrorKind, SumoClient};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Search job id used by every mocked job.
#[allow(dead_code)]
pub const JOB_ID: &str = "4E5A1C2B9D0F3A77";

/// `Authorization` value for the test credentials `suTEST` / `secret`.
#[allow(dead_code)]
pub const AUTH_HEADER: &str = "Basic c3VURVNUOnNlY3JldA==";

/// Epoch millis used as the first `_messagetime` in generated pages.
#[allow(dead_code)]
pub const BASE_MESSAGE_TIME: i64 = 1_714_557_600_000;

#[allow(dead_code)]
pub const JOBS_PATH: &str = "/api/v1/search/jobs";

#[allow(dead_code)]
pub fn job_path() -> String {
    format!("{JOBS_PATH}/{JOB_ID}")
}

#[allow(dead_code)]
pub fn page_path(data_type: &str) -> String {
    format!("{}/{}", job_path(), data_type)
}

/// Client pointed at the mock server with a 10ms poll interval.
#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> SumoClient {
    test_client_builder(server).build().unwrap()
}

#[allow(dead_code)]
pub fn test_client_builder(server: &MockServer) -> sumo_client::SumoClientBuilder {
    SumoClient::builder()
        .api_url(format!("{}/api", server.uri()))
        .access_id("suTEST".to_string())
        .access_key("secret".to_string())
        .poll_interval(Duration::from_millis(10))
}

/// Respond to job submission with 202, an absolute `Location` and one cookie.
#[allow(dead_code)]
pub async fn mount_job_created(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(JOBS_PATH))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("Location", format!("{}{}", server.uri(), job_path()))
                .insert_header("Set-Cookie", "JSESSIONID=test-session")
                .set_body_json(json!({ "id": JOB_ID, "link": { "rel": "self" } })),
        )
        .mount(server)
        .await;
}

/// Respond to every status poll with `body`.
#[allow(dead_code)]
pub async fn mount_status(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(job_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Status body for a finished message search with `count` messages.
#[allow(dead_code)]
pub fn done_status(count: u64) -> Value {
    let mut status = load_fixture("jobs/status_done.json");
    status["messageCount"] = json!(count);
    status
}

/// A `messages` page of `count` rows starting at sequence number `offset`.
#[allow(dead_code)]
pub fn messages_body(offset: u64, count: u64) -> Value {
    let messages: Vec<Value> = (offset..offset + count)
        .map(|i| {
            json!({
                "map": {
                    "_messagetime": (BASE_MESSAGE_TIME + i as i64).to_string(),
                    "_raw": format!("message {i}"),
                    "seq": i.to_string(),
                }
            })
        })
        .collect();
    json!({ "fields": [], "messages": messages })
}
