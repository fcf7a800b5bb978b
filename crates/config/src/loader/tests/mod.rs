//! Tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test builder methods for configuration loading.
//! - Test environment variable handling and precedence.
//! - Test validation of URLs, timeouts, poll intervals and page sizes.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod basic_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Loader preloaded with a valid endpoint and credential pair.
pub fn valid_loader() -> crate::loader::builder::ConfigLoader {
    crate::loader::builder::ConfigLoader::new()
        .with_api_url("https://api.us2.sumologic.com/api".to_string())
        .with_access_id("suABC".to_string())
        .with_access_key("key-123".to_string())
}
