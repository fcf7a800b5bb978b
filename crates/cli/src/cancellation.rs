//! CLI cancellation utilities.
//!
//! Responsibilities:
//! - Define a single, recognizable `Cancelled` error used to signal user-initiated
//!   cancellation (Ctrl+C/SIGINT) through `anyhow::Result`.
//! - Wire Ctrl+C to the client's `CancellationToken`.
//! - Centralize the cancellation message and Unix-standard SIGINT exit code (130).
//!
//! Does NOT handle:
//! - Deciding *when* to check for cancellation; commands do so between awaits and rows.
//!
//! Invariants:
//! - Once cancelled, the token remains cancelled forever.

use std::fmt;

use sumo_client::{ClientError, CancellationToken};

/// Standard Unix exit code for SIGINT: 128 + 2.
pub const SIGINT_EXIT_CODE: u8 = 130;

/// Marker error used to indicate user-driven cancellation.
#[derive(Debug, Clone, Copy)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Returns true if this anyhow error represents a cancellation.
///
/// The client reports a cancelled wait as `ClientError::Cancelled`; commands
/// report cancellation between rows with the `Cancelled` marker.
pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.is::<Cancelled>()
        || matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Cancelled)
        )
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}

/// Cancel `token` on the first Ctrl+C.
pub fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        token.cancel();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_is_cancelled() {
        let err = anyhow::Error::new(Cancelled);
        assert!(is_cancelled_error(&err));
    }

    #[test]
    fn test_client_cancelled_is_cancelled() {
        let err = anyhow::Error::new(ClientError::Cancelled);
        assert!(is_cancelled_error(&err));
    }

    #[test]
    fn test_other_errors_are_not_cancelled() {
        let err = anyhow::Error::new(ClientError::JobCancelled);
        assert!(!is_cancelled_error(&err));
        assert!(!is_cancelled_error(&anyhow::anyhow!("boom")));
    }

    #[test]
    fn test_sigint_exit_code() {
        assert_eq!(SIGINT_EXIT_CODE, 130);
    }
}
