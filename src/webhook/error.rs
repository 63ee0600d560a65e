//! Error types for HTTP and webhook operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level without dictating
/// recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built for the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Failure of a single delivery attempt.
///
/// Every variant is retried by [`HttpWebhook`](super::HttpWebhook) until the
/// retry budget runs out.
#[derive(Debug, Error)]
pub enum RetryableError {
    /// The request never produced a response.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server answered with a status outside `[200, 300)`.
    #[error("HTTP {status}")]
    NonSuccessStatus {
        /// Status code returned by the server
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
    },
}

/// Terminal error from a webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The payload could not be encoded as JSON.
    #[error("Failed to encode webhook payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Every attempt failed.
    #[error("Webhook failed after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        #[source]
        last_error: RetryableError,
    },
}

impl WebhookError {
    /// Returns the error from the final attempt, if delivery was attempted.
    #[must_use]
    pub const fn last_error(&self) -> Option<&RetryableError> {
        match self {
            Self::MaxRetriesExceeded { last_error, .. } => Some(last_error),
            Self::Payload(_) => None,
        }
    }
}
