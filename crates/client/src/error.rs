//! Error types for the Sumo Logic client.
//!
//! Responsibilities:
//! - Define the single error type surfaced by every client operation.
//! - Map low-level transport, JSON and URL failures into `Unhandled` with the cause kept.
//!
//! Does NOT handle:
//! - Deciding whether an HTTP response is a failure (see `endpoints::classify`).
//!
//! Invariants:
//! - Errors are immutable once constructed.
//! - `Unhandled` preserves its cause through `std::error::Error::source`.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Boxed error used as the preserved cause of [`ClientError::Unhandled`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse category of a [`ClientError`], used by callers to map exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The service answered with a structured error (code and/or message).
    Service,
    /// The service answered with a bare HTTP failure.
    Http,
    /// The job reached a terminal state other than done.
    JobTerminated,
    /// The caller cancelled the run.
    Cancelled,
    /// Transport, parsing or protocol failures.
    Unhandled,
    /// Invalid input supplied by the caller.
    InvalidInput,
}

/// Errors that can occur during Sumo Logic client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Failure response whose body carried a service error code.
    #[error("{message} (code: {code})")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    /// Failure response whose body carried only a message.
    #[error("{message}")]
    ServiceMessage { status: u16, message: String },

    /// Failure response without a structured body.
    #[error("{status} - {reason}")]
    Http { status: u16, reason: String },

    /// The job was force paused by the service.
    #[error("Search job was force paused")]
    JobPaused,

    /// The job was cancelled on the service side.
    #[error("Search job was cancelled")]
    JobCancelled,

    /// The caller cancelled the run before the job finished.
    #[error("Operation cancelled")]
    Cancelled,

    /// Transport, parsing or protocol failure.
    #[error("Unhandled error: {message}")]
    Unhandled {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Access id or access key was not supplied.
    #[error("Access id and access key are required")]
    MissingCredentials,

    /// Invalid search time window.
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),
}

impl ClientError {
    /// Build an `Unhandled` error without an underlying cause.
    pub fn unhandled(message: impl Into<String>) -> Self {
        Self::Unhandled {
            message: message.into(),
            source: None,
        }
    }

    /// Build an `Unhandled` error wrapping the given cause.
    pub fn unhandled_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Unhandled {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Service { .. } | Self::ServiceMessage { .. } => ErrorKind::Service,
            Self::Http { .. } => ErrorKind::Http,
            Self::JobPaused | Self::JobCancelled => ErrorKind::JobTerminated,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Unhandled { .. } => ErrorKind::Unhandled,
            Self::InvalidUrl(_) | Self::InvalidTimeRange(_) | Self::MissingCredentials => {
                ErrorKind::InvalidInput
            }
        }
    }

    /// Service error code, when the failure body carried one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    /// HTTP status of the failed response, for classified failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. }
            | Self::ServiceMessage { status, .. }
            | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message without the code suffix.
    pub fn message(&self) -> String {
        match self {
            Self::Service { message, .. } | Self::ServiceMessage { message, .. } => {
                message.clone()
            }
            Self::Unhandled { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// True when the job itself ended in a non-success terminal state.
    pub fn is_job_terminal(&self) -> bool {
        matches!(self, Self::JobPaused | Self::JobCancelled)
    }

    /// True when the cause is a refused connection or a timed-out request.
    pub fn is_connection_failure(&self) -> bool {
        match self {
            Self::Unhandled {
                source: Some(source),
                ..
            } => source
                .downcast_ref::<reqwest::Error>()
                .is_some_and(|e| e.is_connect() || e.is_timeout()),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else if err.is_decode() {
            "failed to decode response body".to_string()
        } else {
            "HTTP transport failure".to_string()
        };
        Self::unhandled_with(message, err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::unhandled_with(format!("invalid JSON: {}", err), err)
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        Self::unhandled_with(format!("invalid URL in response: {}", err), err)
    }
}
