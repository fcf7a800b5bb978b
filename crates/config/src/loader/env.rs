//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `SUMO_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(var: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(var)
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                message: format!("must be {}", expected),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("SUMO_API_URL") {
        loader.set_api_url(Some(url));
    }
    if let Some(id) = env_var_or_none("SUMO_ACCESS_ID") {
        loader.set_access_id(Some(id));
    }
    if let Some(key) = env_var_or_none("SUMO_ACCESS_KEY") {
        loader.set_access_key(Some(SecretString::new(key.into())));
    }
    if let Some(skip) = parse_env::<bool>("SUMO_SKIP_VERIFY", "true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>("SUMO_TIMEOUT", "a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(millis) = parse_env::<u64>("SUMO_POLL_INTERVAL_MS", "a number")? {
        loader.set_poll_interval(Some(Duration::from_millis(millis)));
    }
    if let Some(size) = parse_env::<u64>("SUMO_PAGE_SIZE", "a number")? {
        loader.set_page_size(Some(size));
    }
    Ok(())
}
