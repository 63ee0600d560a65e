//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Total webhook attempts per invocation, including the first.
pub const RETRY_MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry in seconds.
pub const RETRY_INITIAL_DELAY_SECS: u64 = 1;

/// Backoff multiplier between retries.
pub const RETRY_MULTIPLIER: f64 = 2.0;

/// Per-request HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Log stream name reported by the local `invoke` command.
pub const LOCAL_LOG_STREAM: &str = "local-invoke";

/// Default initial retry delay as Duration.
#[must_use]
pub const fn retry_initial_delay() -> Duration {
    Duration::from_secs(RETRY_INITIAL_DELAY_SECS)
}

/// Default HTTP timeout as Duration.
#[must_use]
pub const fn http_timeout() -> Duration {
    Duration::from_secs(HTTP_TIMEOUT_SECS)
}
