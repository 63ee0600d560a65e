//! Outbound webhook payload.

use serde_json::{Map, Value};

use super::event::field;
use super::{CustomResourceEvent, EventError};

/// Key of the webhook URL inside `ResourceProperties`.
pub const URL_KEY: &str = "url";

/// Key added to the payload carrying the original `RequestType`.
pub const REQUEST_TYPE_KEY: &str = "request_type";

/// JSON body POSTed to the webhook.
///
/// Built from an event by:
/// 1. copying every top-level event field except `ResourceProperties`,
/// 2. merging each `ResourceProperties` entry into the top level,
/// 3. writing `request_type` with the original verb.
///
/// Later steps overwrite earlier ones on key collisions, so a property
/// named like an event field wins, and `request_type` always reflects the
/// event. The `url` property stays in the body.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundPayload {
    url: url::Url,
    body: Map<String, Value>,
}

impl OutboundPayload {
    /// Flattens `event` into a webhook payload.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] if `ResourceProperties` is missing or not an
    /// object, or if its `url` is missing, empty, or not an HTTP(S) URL.
    pub fn from_event(event: &CustomResourceEvent) -> Result<Self, EventError> {
        let mut body = event.fields().clone();

        let properties = match body.remove(field::RESOURCE_PROPERTIES) {
            Some(Value::Object(properties)) => properties,
            _ => return Err(EventError::MissingResourceProperties),
        };

        let url = webhook_url(&properties)?;

        body.extend(properties);
        body.insert(
            REQUEST_TYPE_KEY.to_string(),
            Value::String(event.request_type().as_str().to_string()),
        );

        Ok(Self { url, body })
    }

    /// Target of the POST.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }

    /// The flattened JSON object.
    #[must_use]
    pub const fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    /// Encodes the body as UTF-8 JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; a map of JSON values does not fail in
    /// practice.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.body)
    }
}

fn webhook_url(properties: &Map<String, Value>) -> Result<url::Url, EventError> {
    let raw = match properties.get(URL_KEY) {
        Some(Value::String(raw)) if !raw.trim().is_empty() => raw,
        _ => return Err(EventError::MissingWebhookUrl),
    };

    let invalid = |reason: String| EventError::InvalidWebhookUrl {
        url: raw.clone(),
        reason,
    };

    let url = url::Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(invalid(format!(
            "unsupported scheme '{scheme}', expected http or https"
        ))),
    }
}
