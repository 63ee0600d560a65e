//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the event file.
    #[error("Failed to read event file '{}': {source}", path.display())]
    FileRead {
        /// Path to the event file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The event file is not valid JSON.
    #[error("Failed to parse event file '{}': {source}", path.display())]
    EventParse {
        /// Path to the event file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Invalid duration value.
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names used in error messages.
pub mod field {
    /// The HTTP timeout option.
    pub const TIMEOUT: &str = "timeout";
}
