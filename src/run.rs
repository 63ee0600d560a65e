//! Application execution logic.
//!
//! Wires the HTTP client, webhook sender, and responder together and
//! either serves Lambda invocations or handles one local event.

use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::{Value, json};
use thiserror::Error;

use cfn_phonehome::cfn::{
    CfnResponder, CustomResourceEvent, EventError, InvocationContext, LogResponder, Responder,
    ResponseStatus,
};
use cfn_phonehome::config::{InvokeOptions, Mode, ValidatedConfig};
use cfn_phonehome::notifier::{NotifyError, WebhookNotifier};
use cfn_phonehome::webhook::{HttpWebhook, ReqwestClient, WebhookSender};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Request id reported for local invocations.
const LOCAL_REQUEST_ID: &str = "local";

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The event cannot be acknowledged because it is malformed.
    #[error("Invalid custom resource event: {0}")]
    InvalidEvent(#[source] EventError),

    /// The completion signal could not be delivered.
    #[error(transparent)]
    Notify(#[from] NotifyError),

    /// The Lambda runtime loop stopped.
    #[error("Lambda runtime error: {0}")]
    Runtime(#[source] lambda_runtime::Error),
}

/// Executes the application in the configured mode.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the Lambda runtime
/// loop fails, or (in invoke mode) the event cannot be handled.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let client = ReqwestClient::with_timeout(config.http_timeout).map_err(RunError::HttpClient)?;
    let webhook = HttpWebhook::new(client.clone()).with_retry_policy(config.retry_policy);

    match config.mode {
        Mode::Serve => {
            tracing::info!("Serving custom resource events from the Lambda runtime");
            serve(&WebhookNotifier::new(webhook, CfnResponder::new(client))).await
        }
        Mode::Invoke(options) => {
            let status = invoke(webhook, client, options).await?;
            tracing::info!("Invocation finished with {status}");
            Ok(())
        }
    }
}

/// Runs the Lambda runtime loop until it fails.
#[cfg(not(tarpaulin_include))]
async fn serve<W: WebhookSender, R: Responder>(
    notifier: &WebhookNotifier<W, R>,
) -> Result<(), RunError> {
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_lambda_event(notifier, event).await
    }))
    .await
    .map_err(RunError::Runtime)
}

/// Adapts one runtime invocation to [`handle_event`].
///
/// A failed response PUT is logged and the invocation still succeeds: an
/// invocation error would make Lambda re-run the handler, repeating the
/// webhook POST and the signal.
async fn handle_lambda_event<W: WebhookSender, R: Responder>(
    notifier: &WebhookNotifier<W, R>,
    event: LambdaEvent<Value>,
) -> Result<Value, lambda_runtime::Error> {
    let (payload, ctx) = event.into_parts();
    let context = InvocationContext::new(ctx.request_id.clone(), ctx.env_config.log_stream.clone());

    let status = match handle_event(notifier, payload, &context).await {
        Ok(status) => status,
        Err(RunError::Notify(e @ NotifyError::Respond { status, .. })) => {
            tracing::error!(request_id = %context.request_id, "{e}");
            status
        }
        Err(e) => {
            tracing::error!(request_id = %context.request_id, "{e}");
            return Err(e.into());
        }
    };

    Ok(json!({ "Status": status }))
}

/// Handles the local `invoke` command.
async fn invoke<W: WebhookSender>(
    webhook: W,
    client: ReqwestClient,
    options: InvokeOptions,
) -> Result<ResponseStatus, RunError> {
    let context = InvocationContext::new(LOCAL_REQUEST_ID, options.log_stream);

    if options.send_response {
        let notifier = WebhookNotifier::new(webhook, CfnResponder::new(client));
        handle_event(&notifier, options.event, &context).await
    } else {
        let notifier = WebhookNotifier::new(webhook, LogResponder);
        handle_event(&notifier, options.event, &context).await
    }
}

/// Parses a raw event and hands it to the notifier.
async fn handle_event<W: WebhookSender, R: Responder>(
    notifier: &WebhookNotifier<W, R>,
    payload: Value,
    context: &InvocationContext,
) -> Result<ResponseStatus, RunError> {
    let event = CustomResourceEvent::from_value(payload).map_err(RunError::InvalidEvent)?;
    Ok(notifier.handle(&event, context).await?)
}
