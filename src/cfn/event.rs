//! Custom-resource event model.

use std::fmt;

use serde_json::{Map, Value};

use super::EventError;

/// Well-known top-level keys of a CloudFormation custom-resource event.
pub mod field {
    /// Lifecycle verb of the request.
    pub const REQUEST_TYPE: &str = "RequestType";
    /// Pre-signed URL the response document is PUT to.
    pub const RESPONSE_URL: &str = "ResponseURL";
    /// ARN of the stack.
    pub const STACK_ID: &str = "StackId";
    /// Unique id of this request.
    pub const REQUEST_ID: &str = "RequestId";
    /// Logical name of the resource in the template.
    pub const LOGICAL_RESOURCE_ID: &str = "LogicalResourceId";
    /// Physical id assigned on a previous Create (absent on Create).
    pub const PHYSICAL_RESOURCE_ID: &str = "PhysicalResourceId";
    /// User-supplied properties from the template.
    pub const RESOURCE_PROPERTIES: &str = "ResourceProperties";
}

/// Lifecycle verb of a custom-resource request.
///
/// Unrecognized verbs are kept verbatim in [`RequestType::Other`] so they
/// can still be forwarded and acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestType {
    /// Resource is being created.
    Create,
    /// Resource properties changed.
    Update,
    /// Resource is being deleted.
    Delete,
    /// Any other verb, e.g. `DeleteFunction`.
    Other(String),
}

impl RequestType {
    /// Prefix of verbs that are acknowledged without notifying the webhook.
    pub const DELETE_FUNCTION_PREFIX: &'static str = "DeleteFunction";

    /// Returns the verb as it appears in the event.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::Other(verb) => verb,
        }
    }

    /// Returns true if a failed notification must fail the stack operation.
    ///
    /// Only Create and Update block; every other verb is acknowledged as
    /// successful so teardown never gets stuck on the webhook.
    #[must_use]
    pub const fn fails_on_notification_error(&self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }

    /// Returns true for `DeleteFunction*` verbs, which skip the webhook.
    #[must_use]
    pub fn is_delete_function(&self) -> bool {
        matches!(self, Self::Other(verb) if verb.starts_with(Self::DELETE_FUNCTION_PREFIX))
    }
}

impl From<&str> for RequestType {
    fn from(verb: &str) -> Self {
        match verb {
            "Create" => Self::Create,
            "Update" => Self::Update,
            "Delete" => Self::Delete,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inbound custom-resource event.
///
/// Holds typed copies of the header fields needed to respond to
/// CloudFormation, and the complete raw mapping so every key can be
/// forwarded to the webhook untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomResourceEvent {
    request_type: RequestType,
    response_url: url::Url,
    stack_id: String,
    request_id: String,
    logical_resource_id: String,
    physical_resource_id: Option<String>,
    fields: Map<String, Value>,
}

impl CustomResourceEvent {
    /// Parses an event delivered by the Lambda runtime.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] if the value is not an object, or lacks a
    /// string `RequestType` or a valid `ResponseURL`. Without those the
    /// invocation cannot be acknowledged at all.
    pub fn from_value(value: Value) -> Result<Self, EventError> {
        let Value::Object(fields) = value else {
            return Err(EventError::NotAnObject);
        };

        let request_type: RequestType = required_str(&fields, field::REQUEST_TYPE)?.into();
        let raw_url = required_str(&fields, field::RESPONSE_URL)?;
        let response_url = url::Url::parse(raw_url).map_err(|e| EventError::InvalidResponseUrl {
            url: raw_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            request_type,
            response_url,
            stack_id: optional_str(&fields, field::STACK_ID).unwrap_or_default(),
            request_id: optional_str(&fields, field::REQUEST_ID).unwrap_or_default(),
            logical_resource_id: optional_str(&fields, field::LOGICAL_RESOURCE_ID)
                .unwrap_or_default(),
            physical_resource_id: optional_str(&fields, field::PHYSICAL_RESOURCE_ID),
            fields,
        })
    }

    /// Lifecycle verb of this request.
    #[must_use]
    pub const fn request_type(&self) -> &RequestType {
        &self.request_type
    }

    /// URL the response document must be PUT to.
    #[must_use]
    pub const fn response_url(&self) -> &url::Url {
        &self.response_url
    }

    /// ARN of the stack.
    #[must_use]
    pub fn stack_id(&self) -> &str {
        &self.stack_id
    }

    /// Unique id of this request.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Logical resource name from the template.
    #[must_use]
    pub fn logical_resource_id(&self) -> &str {
        &self.logical_resource_id
    }

    /// Physical id from a previous Create, if any.
    #[must_use]
    pub fn physical_resource_id(&self) -> Option<&str> {
        self.physical_resource_id.as_deref()
    }

    /// All top-level fields exactly as received.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

fn required_str<'a>(
    fields: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, EventError> {
    match fields.get(key) {
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(EventError::NotAString(key)),
        None => Err(EventError::MissingField(key)),
    }
}

fn optional_str(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(ToString::to_string)
}
