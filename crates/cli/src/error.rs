//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use sumo_client::{ClientError, ErrorKind};

use crate::cancellation::SIGINT_EXIT_CODE;

/// Structured exit codes for sumo-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Authentication failure - missing or rejected access id/key.
    AuthenticationFailed = 2,

    /// Connection error - network, timeout, DNS or bad endpoint URL.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// Resource not found - unknown or expired search job.
    NotFound = 4,

    /// Validation error - invalid query, time range or parameters.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// Permission denied - insufficient privileges.
    PermissionDenied = 6,

    /// Rate limited - HTTP 429 Too Many Requests.
    RateLimited = 7,

    /// Service unavailable - HTTP 502/503/504.
    ServiceUnavailable = 8,

    /// The search job was cancelled or force-paused by the service.
    JobTerminated = 9,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = SIGINT_EXIT_CODE,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    /// Returns true if this exit code indicates a retryable condition.
    #[allow(dead_code)]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            ExitCode::ConnectionError | ExitCode::RateLimited | ExitCode::ServiceUnavailable
        )
    }

    fn from_status(status: u16) -> Self {
        match status {
            400 => ExitCode::ValidationError,
            401 => ExitCode::AuthenticationFailed,
            403 => ExitCode::PermissionDenied,
            404 => ExitCode::NotFound,
            429 => ExitCode::RateLimited,
            502..=504 => ExitCode::ServiceUnavailable,
            _ => ExitCode::GeneralError,
        }
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Cancelled => ExitCode::Interrupted,
            ClientError::MissingCredentials => ExitCode::AuthenticationFailed,
            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::InvalidTimeRange(_) => ExitCode::ValidationError,
            ClientError::Unhandled { .. } if err.is_connection_failure() => {
                ExitCode::ConnectionError
            }
            _ => match err.kind() {
                ErrorKind::JobTerminated => ExitCode::JobTerminated,
                _ => err.status().map_or(ExitCode::GeneralError, Self::from_status),
            },
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if the error is not a ClientError.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
        }
        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(status: u16) -> ClientError {
        ClientError::Service {
            status,
            code: "searchjob.test".to_string(),
            message: "test".to_string(),
        }
    }

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::AuthenticationFailed.as_i32(), 2);
        assert_eq!(ExitCode::JobTerminated.as_i32(), 9);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_is_retryable() {
        assert!(!ExitCode::Success.is_retryable());
        assert!(ExitCode::ConnectionError.is_retryable());
        assert!(ExitCode::RateLimited.is_retryable());
        assert!(ExitCode::ServiceUnavailable.is_retryable());
        assert!(!ExitCode::ValidationError.is_retryable());
        assert!(!ExitCode::JobTerminated.is_retryable());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ExitCode::from(&service(400)), ExitCode::ValidationError);
        assert_eq!(ExitCode::from(&service(401)), ExitCode::AuthenticationFailed);
        assert_eq!(ExitCode::from(&service(403)), ExitCode::PermissionDenied);
        assert_eq!(ExitCode::from(&service(404)), ExitCode::NotFound);
        assert_eq!(ExitCode::from(&service(429)), ExitCode::RateLimited);
        assert_eq!(ExitCode::from(&service(503)), ExitCode::ServiceUnavailable);
        assert_eq!(ExitCode::from(&service(500)), ExitCode::GeneralError);
    }

    #[test]
    fn test_http_and_message_errors_use_status() {
        let http = ClientError::Http {
            status: 502,
            reason: "Bad Gateway".to_string(),
        };
        let message = ClientError::ServiceMessage {
            status: 401,
            message: "Credential could not be verified.".to_string(),
        };
        assert_eq!(ExitCode::from(&http), ExitCode::ServiceUnavailable);
        assert_eq!(ExitCode::from(&message), ExitCode::AuthenticationFailed);
    }

    #[test]
    fn test_job_terminal_states() {
        assert_eq!(ExitCode::from(&ClientError::JobPaused), ExitCode::JobTerminated);
        assert_eq!(ExitCode::from(&ClientError::JobCancelled), ExitCode::JobTerminated);
    }

    #[test]
    fn test_input_errors() {
        assert_eq!(
            ExitCode::from(&ClientError::MissingCredentials),
            ExitCode::AuthenticationFailed
        );
        assert_eq!(
            ExitCode::from(&ClientError::InvalidUrl("x".to_string())),
            ExitCode::ConnectionError
        );
        assert_eq!(
            ExitCode::from(&ClientError::InvalidTimeRange("x".to_string())),
            ExitCode::ValidationError
        );
    }

    #[test]
    fn test_cancelled_maps_to_interrupted() {
        assert_eq!(ExitCode::from(&ClientError::Cancelled), ExitCode::Interrupted);
    }

    #[test]
    fn test_unhandled_without_transport_cause() {
        let err = ClientError::unhandled("search job response is missing the Location header");
        assert_eq!(ExitCode::from(&err), ExitCode::GeneralError);
    }

    #[test]
    fn test_anyhow_chain_is_searched() {
        let err = anyhow::Error::new(service(404)).context("Search failed");
        assert_eq!(err.exit_code(), ExitCode::NotFound);
        assert_eq!(anyhow::anyhow!("other").exit_code(), ExitCode::GeneralError);
    }
}
