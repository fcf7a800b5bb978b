//! Configuration type definitions.
//!
//! Responsibilities:
//! - Define the endpoint (connection) and credential (auth) configuration types.
//! - Provide serialization helpers for sensitive types (secrets, durations).
//!
//! Does NOT handle:
//! - Loading from environment variables or `.env` files (see `loader` module).
//! - Actual network connections or request signing (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - Serialization helpers (`secret_string`, `duration_seconds`, `duration_millis`) are private modules.

mod auth;
pub(crate) mod connection;

pub use auth::AuthConfig;
pub use connection::{Config, ConnectionConfig};
