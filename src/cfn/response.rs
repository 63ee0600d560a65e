//! Completion signal and the CloudFormation response document.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::CustomResourceEvent;

/// Key of the failure detail inside the signal's data.
pub const ERROR_KEY: &str = "Error";

/// Terminal status reported to CloudFormation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    /// The resource operation succeeded.
    Success,
    /// The resource operation failed; the stack operation rolls back.
    Failed,
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("SUCCESS"),
            Self::Failed => f.write_str("FAILED"),
        }
    }
}

/// The single completion signal of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSignal {
    status: ResponseStatus,
    reason: Option<String>,
    data: Map<String, Value>,
}

impl ResponseSignal {
    /// SUCCESS with no data.
    #[must_use]
    pub fn success() -> Self {
        Self {
            status: ResponseStatus::Success,
            reason: None,
            data: Map::new(),
        }
    }

    /// FAILED with `{"Error": error}` as data.
    ///
    /// The error text is also used as the response `Reason`, which is what
    /// the CloudFormation console shows for the failed resource.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        let mut data = Map::new();
        data.insert(ERROR_KEY.to_string(), Value::String(error.clone()));
        Self {
            status: ResponseStatus::Failed,
            reason: Some(error),
            data,
        }
    }

    /// Terminal status.
    #[must_use]
    pub const fn status(&self) -> ResponseStatus {
        self.status
    }

    /// Explicit reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Detail mapping sent as `Data`.
    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

/// Lambda-side facts needed to fill in the response document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// Lambda request id of this invocation.
    pub request_id: String,
    /// CloudWatch log stream the function logs to.
    pub log_stream_name: String,
}

impl InvocationContext {
    /// Creates a context.
    #[must_use]
    pub fn new(request_id: impl Into<String>, log_stream_name: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            log_stream_name: log_stream_name.into(),
        }
    }
}

/// JSON document PUT to the event's `ResponseURL`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseDocument<'a> {
    /// SUCCESS or FAILED
    pub status: ResponseStatus,
    /// Human-readable explanation
    pub reason: String,
    /// Physical id of the resource
    pub physical_resource_id: &'a str,
    /// Echoed from the event
    pub stack_id: &'a str,
    /// Echoed from the event
    pub request_id: &'a str,
    /// Echoed from the event
    pub logical_resource_id: &'a str,
    /// Whether `Data` is masked in the console
    pub no_echo: bool,
    /// Detail mapping
    pub data: &'a Map<String, Value>,
}

impl<'a> ResponseDocument<'a> {
    /// Builds the document for `signal`.
    ///
    /// Without an explicit reason the document points at the log stream.
    /// The physical id is kept from the event when CloudFormation supplied
    /// one, so an Update never looks like a replacement; otherwise the log
    /// stream name is used.
    #[must_use]
    pub fn new(
        event: &'a CustomResourceEvent,
        context: &'a InvocationContext,
        signal: &'a ResponseSignal,
    ) -> Self {
        let details = format!(
            "See the details in CloudWatch Log Stream: {}",
            context.log_stream_name
        );
        let reason = match signal.reason() {
            Some(reason) => format!("{reason}. {details}"),
            None => details,
        };

        Self {
            status: signal.status(),
            reason,
            physical_resource_id: event
                .physical_resource_id()
                .unwrap_or(&context.log_stream_name),
            stack_id: event.stack_id(),
            request_id: event.request_id(),
            logical_resource_id: event.logical_resource_id(),
            no_echo: false,
            data: signal.data(),
        }
    }
}
