//! Custom-resource handler: notify the webhook, then answer CloudFormation.
//!
//! [`WebhookNotifier::handle`] turns one event into exactly one
//! [`ResponseSignal`]:
//!
//! | Outcome | Create / Update | Delete and other verbs |
//! |---|---|---|
//! | webhook accepted (2xx) | SUCCESS | SUCCESS |
//! | retries exhausted | FAILED `{Error: last error}` | SUCCESS |
//! | bad `ResourceProperties` / `url` | FAILED `{Error: reason}` | SUCCESS |
//!
//! `DeleteFunction*` verbs are acknowledged with SUCCESS without any POST.

use thiserror::Error;

use crate::cfn::{
    CustomResourceEvent, InvocationContext, OutboundPayload, RespondError, Responder,
    ResponseSignal, ResponseStatus,
};
use crate::webhook::{WebhookError, WebhookSender};

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;

/// Error returned when the completion signal itself could not be delivered.
///
/// Webhook failures never surface here; they are folded into the signal.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Sending the signal to CloudFormation failed.
    #[error("Failed to report {status} to CloudFormation: {source}")]
    Respond {
        /// The status that was being reported
        status: ResponseStatus,
        /// Underlying delivery error
        #[source]
        source: RespondError,
    },
}

/// Why the webhook was not reached.
#[derive(Debug, Error)]
enum DeliveryFailure {
    #[error(transparent)]
    Event(#[from] crate::cfn::EventError),

    #[error(transparent)]
    Webhook(#[from] WebhookError),
}

impl DeliveryFailure {
    /// Text recorded under `Error` in the failure signal.
    ///
    /// For exhausted retries this is the last attempt's error, e.g.
    /// `HTTP 500 Internal Server Error`.
    fn detail(&self) -> String {
        match self {
            Self::Webhook(e) => e
                .last_error()
                .map_or_else(|| e.to_string(), ToString::to_string),
            Self::Event(e) => e.to_string(),
        }
    }
}

/// Forwards custom-resource events to a webhook and reports the outcome.
///
/// # Type Parameters
///
/// - `W`: The webhook sender (retries live there)
/// - `R`: The responder delivering the signal
#[derive(Debug)]
pub struct WebhookNotifier<W, R> {
    webhook: W,
    responder: R,
}

impl<W: WebhookSender, R: Responder> WebhookNotifier<W, R> {
    /// Creates a notifier.
    #[must_use]
    pub const fn new(webhook: W, responder: R) -> Self {
        Self { webhook, responder }
    }

    /// Handles one invocation and emits its single signal.
    ///
    /// Returns the status that was reported.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] only if the signal could not be delivered.
    pub async fn handle(
        &self,
        event: &CustomResourceEvent,
        context: &InvocationContext,
    ) -> Result<ResponseStatus, NotifyError> {
        tracing::info!(
            request_type = %event.request_type(),
            request_id = event.request_id(),
            logical_resource_id = event.logical_resource_id(),
            "Handling custom resource event"
        );

        let signal = self.decide(event).await;
        let status = signal.status();

        self.responder
            .respond(event, context, &signal)
            .await
            .map_err(|source| NotifyError::Respond { status, source })?;

        Ok(status)
    }

    /// Runs the webhook delivery and maps its outcome to a signal.
    async fn decide(&self, event: &CustomResourceEvent) -> ResponseSignal {
        let request_type = event.request_type();

        if request_type.is_delete_function() {
            tracing::info!(%request_type, "Acknowledging without notifying the webhook");
            return ResponseSignal::success();
        }

        let failure = match self.deliver(event).await {
            Ok(()) => return ResponseSignal::success(),
            Err(failure) => failure,
        };

        let detail = failure.detail();
        if request_type.fails_on_notification_error() {
            tracing::error!(%request_type, "Webhook notification failed: {failure}");
            ResponseSignal::failed(detail)
        } else {
            tracing::warn!(
                %request_type,
                "Webhook notification failed, reporting success anyway: {failure}"
            );
            ResponseSignal::success()
        }
    }

    async fn deliver(&self, event: &CustomResourceEvent) -> Result<(), DeliveryFailure> {
        let payload = OutboundPayload::from_event(event)?;
        self.webhook.send(&payload).await?;
        Ok(())
    }
}
