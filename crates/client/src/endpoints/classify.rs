//! Response classification.
//!
//! Responsibilities:
//! - Decide whether an HTTP response is a success (200, 202 or 302).
//! - Turn failure responses into the matching `ClientError` variant.
//!
//! Does NOT handle:
//! - Transport failures before a response exists (see `ClientError::from(reqwest::Error)`).
//!
//! Invariants:
//! - An empty failure body is treated as `{}`.
//! - A non-null `code` wins over `message`; with neither, the error is `Http`.
//! - A failure body that is not JSON is classified as `Http`.

use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};

/// True for the statuses the service uses to signal success.
pub fn is_success(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::OK | StatusCode::ACCEPTED | StatusCode::FOUND
    )
}

/// Classify a response from its status and body.
///
/// Returns `None` for success, otherwise the error the body describes.
pub fn classify(status: StatusCode, body: &str) -> Option<ClientError> {
    if is_success(status) {
        None
    } else {
        Some(classify_failure(status, body))
    }
}

/// Pass successful responses through; read and classify the body of failures.
pub async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if is_success(status) {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = response.text().await?;
    let err = classify_failure(status, &body);
    debug!(status = status.as_u16(), path = %url, error = %err, "Request failed");
    Err(err)
}

fn classify_failure(status: StatusCode, body: &str) -> ClientError {
    let trimmed = body.trim();
    let json = if trimmed.is_empty() {
        Value::Object(Default::default())
    } else {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(json) => json,
            Err(_) => return http_error(status),
        }
    };

    let message = json.get("message").and_then(text_of);
    if let Some(code) = json.get("code").and_then(text_of) {
        return ClientError::Service {
            status: status.as_u16(),
            code,
            message: message.unwrap_or_else(|| http_error(status).to_string()),
        };
    }
    if let Some(message) = message {
        return ClientError::ServiceMessage {
            status: status.as_u16(),
            message,
        };
    }
    http_error(status)
}

fn http_error(status: StatusCode) -> ClientError {
    ClientError::Http {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
