//! Shared test utilities for sumo-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Mount a complete mocked search job (submit, poll, one page).
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.
//! - Credentials are `suTEST` / `secret` unless overridden.

use assert_cmd::Command;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const JOBS_PATH: &str = "/api/v1/search/jobs";
#[allow(dead_code)]
pub const JOB_PATH: &str = "/api/v1/search/jobs/CLI0JOB";

const SUMO_VARS: [&str; 7] = [
    "SUMO_API_URL",
    "SUMO_ACCESS_ID",
    "SUMO_ACCESS_KEY",
    "SUMO_TIMEOUT",
    "SUMO_SKIP_VERIFY",
    "SUMO_POLL_INTERVAL_MS",
    "SUMO_PAGE_SIZE",
];

/// Returns a hermetic `sumo-cli` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Host `SUMO_*` variables are cleared, then test credentials are set.
/// - Polling runs every 10ms.
pub fn sumo_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sumo-cli");
    cmd.env("DOTENV_DISABLED", "1");
    for var in SUMO_VARS {
        cmd.env_remove(var);
    }
    cmd.env("SUMO_ACCESS_ID", "suTEST")
        .env("SUMO_ACCESS_KEY", "secret")
        .env("SUMO_POLL_INTERVAL_MS", "10")
        .env_remove("RUST_LOG");
    cmd
}

/// Hermetic command pointed at the mock server's `/api/` root.
#[allow(dead_code)]
pub fn sumo_cmd_for(server: &MockServer) -> Command {
    let mut cmd = sumo_cmd();
    cmd.env("SUMO_API_URL", format!("{}/api/", server.uri()));
    cmd
}

/// Mount job submission returning `JOB_PATH` as the location.
#[allow(dead_code)]
pub async fn mount_submit(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(JOBS_PATH))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("Location", format!("{}{}", server.uri(), JOB_PATH)),
        )
        .mount(server)
        .await;
}

/// Mount a status poll answering `body` forever.
#[allow(dead_code)]
pub async fn mount_status(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(JOB_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn done(message_count: u64, record_count: u64) -> Value {
    json!({
        "state": "DONE GATHERING RESULTS",
        "messageCount": message_count,
        "recordCount": record_count,
        "pendingErrors": [],
        "pendingWarnings": []
    })
}

/// Mount a finished message search whose single page holds `messages`.
#[allow(dead_code)]
pub async fn mount_message_job(server: &MockServer, messages: Vec<Value>) {
    mount_submit(server).await;
    mount_status(server, done(messages.len() as u64, 0)).await;
    let entries: Vec<Value> = messages.into_iter().map(|m| json!({ "map": m })).collect();
    Mock::given(method("GET"))
        .and(path(format!("{JOB_PATH}/messages")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "messages": entries })))
        .mount(server)
        .await;
}
