//! Error types for event parsing, payload building, and responding.

use thiserror::Error;

use crate::webhook::HttpError;

/// Error type for malformed custom-resource events.
#[derive(Debug, Error)]
pub enum EventError {
    /// The event is not a JSON object.
    #[error("Event must be a JSON object")]
    NotAnObject,

    /// A required top-level field is absent.
    #[error("Event is missing required field '{0}'")]
    MissingField(&'static str),

    /// A field that must be a string has another JSON type.
    #[error("Event field '{0}' must be a string")]
    NotAString(&'static str),

    /// `ResponseURL` is not a valid URL.
    #[error("Invalid ResponseURL '{url}': {reason}")]
    InvalidResponseUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// `ResourceProperties` is absent or not an object.
    #[error("ResourceProperties must be a JSON object")]
    MissingResourceProperties,

    /// `ResourceProperties.url` is absent, empty, or not a string.
    #[error("ResourceProperties is missing the webhook 'url'")]
    MissingWebhookUrl,

    /// `ResourceProperties.url` does not parse as an HTTP(S) URL.
    #[error("Invalid webhook URL '{url}': {reason}")]
    InvalidWebhookUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Error type for delivering the response document to CloudFormation.
#[derive(Debug, Error)]
pub enum RespondError {
    /// The response document could not be encoded.
    #[error("Failed to encode response document: {0}")]
    Encode(#[from] serde_json::Error),

    /// The PUT never produced a response.
    #[error("Failed to send response to CloudFormation: {0}")]
    Http(#[from] HttpError),

    /// CloudFormation's pre-signed URL refused the response.
    #[error("CloudFormation rejected the response with HTTP {status}")]
    Rejected {
        /// Status code returned
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
    },
}
