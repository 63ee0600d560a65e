//! Delivery of the completion signal to CloudFormation.

use std::future::Future;

use super::{CustomResourceEvent, InvocationContext, RespondError, ResponseDocument, ResponseSignal};
use crate::webhook::{HttpClient, HttpRequest};

/// Sends the completion signal for an invocation.
///
/// [`WebhookNotifier`](crate::notifier::WebhookNotifier) calls this exactly
/// once per handled event.
pub trait Responder: Send + Sync {
    /// Reports `signal` for `event`.
    ///
    /// # Errors
    ///
    /// Returns [`RespondError`] if the signal could not be delivered.
    fn respond(
        &self,
        event: &CustomResourceEvent,
        context: &InvocationContext,
        signal: &ResponseSignal,
    ) -> impl Future<Output = Result<(), RespondError>> + Send;
}

/// Responder that PUTs the response document to the event's `ResponseURL`.
///
/// The pre-signed S3 URL is signed for an empty `content-type`, so the
/// header is sent explicitly empty. A single attempt is made.
#[derive(Debug, Clone)]
pub struct CfnResponder<H> {
    client: H,
}

impl<H> CfnResponder<H> {
    /// Creates a responder sending through `client`.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> Responder for CfnResponder<H> {
    async fn respond(
        &self,
        event: &CustomResourceEvent,
        context: &InvocationContext,
        signal: &ResponseSignal,
    ) -> Result<(), RespondError> {
        let document = ResponseDocument::new(event, context, signal);
        let body = serde_json::to_vec(&document)?;

        tracing::debug!(
            url = %event.response_url(),
            body = %String::from_utf8_lossy(&body),
            "Sending response to CloudFormation"
        );

        let request = HttpRequest::put(event.response_url().clone())
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static(""),
            )
            .with_body(body);

        let response = self.client.request(request).await?;
        if !response.is_success() {
            return Err(RespondError::Rejected {
                status: response.status,
                body: response.body_text().map(ToString::to_string),
            });
        }

        tracing::info!(
            status = %signal.status(),
            http_status = response.status.as_u16(),
            "Response delivered to CloudFormation"
        );
        Ok(())
    }
}

/// Responder that only logs the response document.
///
/// Used by the local `invoke` command when the pre-signed URL should not be
/// touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogResponder;

impl Responder for LogResponder {
    async fn respond(
        &self,
        event: &CustomResourceEvent,
        context: &InvocationContext,
        signal: &ResponseSignal,
    ) -> Result<(), RespondError> {
        let document = ResponseDocument::new(event, context, signal);
        let body = serde_json::to_string_pretty(&document)?;

        tracing::info!(
            url = %event.response_url(),
            "Dry run, response not sent:\n{body}"
        );
        Ok(())
    }
}
