//! Configuration management for the Sumo Logic search client.
//!
//! This crate provides the endpoint and credential types consumed by the
//! client crate, plus a loader that assembles them from `.env` files,
//! environment variables and explicit overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AuthConfig, Config, ConnectionConfig};
