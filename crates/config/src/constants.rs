//! Centralized constants for the Sumo search workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default API endpoint (US1 deployment).
pub const DEFAULT_API_URL: &str = "https://api.sumologic.com/api/";

// =============================================================================
// Search Job API
// =============================================================================

/// Path of the search job collection, relative to the API root.
pub const SEARCH_JOBS_PATH: &str = "v1/search/jobs";

/// Time zone sent with every job submission. Time bounds are always UTC.
pub const DEFAULT_TIME_ZONE: &str = "UTC";

/// Field auto-parsing mode requested for every job.
pub const AUTO_PARSING_MODE: &str = "performance";

// =============================================================================
// Search & Polling Defaults
// =============================================================================

/// Fixed delay between job status polls in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Maximum allowed delay between job status polls in milliseconds.
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;

/// Largest page the service accepts for messages/records retrieval.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default time window for queries without an explicit range, in minutes.
pub const DEFAULT_WINDOW_MINUTES: i64 = 15;
