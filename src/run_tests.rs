//! Tests for the run module.

use super::*;
use cfn_phonehome::cfn::OutboundPayload;
use cfn_phonehome::webhook::{
    HttpClient, HttpError, HttpRequest, HttpResponse, RetryableError, WebhookError,
};
use lambda_runtime::Context;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Webhook sender that either accepts or fails every payload.
#[derive(Debug, Default)]
struct StubWebhook {
    fail: bool,
    sent: AtomicUsize,
}

impl WebhookSender for &StubWebhook {
    async fn send(&self, payload: &OutboundPayload) -> Result<(), WebhookError> {
        (**self).send(payload).await
    }
}

impl WebhookSender for StubWebhook {
    async fn send(&self, _payload: &OutboundPayload) -> Result<(), WebhookError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(WebhookError::MaxRetriesExceeded {
                attempts: 3,
                last_error: RetryableError::Http(HttpError::Timeout),
            });
        }
        Ok(())
    }
}

/// HTTP client answering every request with one fixed status.
#[derive(Debug)]
struct FixedStatusClient {
    status: http::StatusCode,
    calls: AtomicUsize,
}

impl FixedStatusClient {
    fn new(status: http::StatusCode) -> Self {
        Self {
            status,
            calls: AtomicUsize::new(0),
        }
    }
}

impl HttpClient for &FixedStatusClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(HttpResponse::with_status(self.status))
    }
}

fn event_json(request_type: &str) -> Value {
    json!({
        "RequestType": request_type,
        "ResponseURL": "https://example.com/response",
        "StackId": "stack",
        "RequestId": "req",
        "LogicalResourceId": "PhoneHome",
        "ResourceProperties": { "url": "https://x/hook" }
    })
}

fn context() -> InvocationContext {
    InvocationContext::new(LOCAL_REQUEST_ID, "test-stream")
}

mod run_error {
    use super::*;

    #[test]
    fn invalid_event_displays_source() {
        let error = RunError::InvalidEvent(EventError::NotAnObject);

        assert_eq!(
            error.to_string(),
            "Invalid custom resource event: Event must be a JSON object"
        );
    }

    #[test]
    fn runtime_error_displays_source() {
        let error = RunError::Runtime("runtime api unreachable".into());

        assert!(error.to_string().contains("runtime api unreachable"));
    }
}

mod handle_event {
    use super::*;

    #[tokio::test]
    async fn successful_delivery_reports_success() {
        let notifier = WebhookNotifier::new(StubWebhook::default(), LogResponder);

        let status = handle_event(&notifier, event_json("Create"), &context())
            .await
            .unwrap();

        assert_eq!(status, ResponseStatus::Success);
    }

    #[tokio::test]
    async fn failed_create_reports_failed() {
        let webhook = StubWebhook {
            fail: true,
            ..StubWebhook::default()
        };
        let notifier = WebhookNotifier::new(webhook, LogResponder);

        let status = handle_event(&notifier, event_json("Create"), &context())
            .await
            .unwrap();

        assert_eq!(status, ResponseStatus::Failed);
    }

    #[tokio::test]
    async fn failed_delete_reports_success() {
        let webhook = StubWebhook {
            fail: true,
            ..StubWebhook::default()
        };
        let notifier = WebhookNotifier::new(webhook, LogResponder);

        let status = handle_event(&notifier, event_json("Delete"), &context())
            .await
            .unwrap();

        assert_eq!(status, ResponseStatus::Success);
    }

    #[tokio::test]
    async fn event_without_response_url_is_rejected_before_sending() {
        let notifier = WebhookNotifier::new(StubWebhook::default(), LogResponder);
        let mut raw = event_json("Create");
        raw.as_object_mut().unwrap().remove("ResponseURL");

        let result = handle_event(&notifier, raw, &context()).await;

        assert!(matches!(
            result,
            Err(RunError::InvalidEvent(EventError::MissingField("ResponseURL")))
        ));
    }
}

mod handle_lambda_event {
    use super::*;

    fn lambda_event(request_type: &str) -> LambdaEvent<Value> {
        let mut ctx = Context::default();
        ctx.request_id = "lambda-req".to_string();
        LambdaEvent::new(event_json(request_type), ctx)
    }

    #[tokio::test]
    async fn rejected_response_does_not_fail_the_invocation() {
        let webhook = StubWebhook::default();
        let response_client = FixedStatusClient::new(http::StatusCode::FORBIDDEN);
        let notifier = WebhookNotifier::new(&webhook, CfnResponder::new(&response_client));

        let result = handle_lambda_event(&notifier, lambda_event("Create")).await;

        assert_eq!(result.unwrap(), json!({ "Status": "SUCCESS" }));
        assert_eq!(webhook.sent.load(Ordering::SeqCst), 1);
        assert_eq!(response_client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejected_failure_signal_still_returns_ok() {
        let webhook = StubWebhook {
            fail: true,
            ..StubWebhook::default()
        };
        let response_client = FixedStatusClient::new(http::StatusCode::INTERNAL_SERVER_ERROR);
        let notifier = WebhookNotifier::new(&webhook, CfnResponder::new(&response_client));

        let result = handle_lambda_event(&notifier, lambda_event("Update")).await;

        assert_eq!(result.unwrap(), json!({ "Status": "FAILED" }));
    }

    #[tokio::test]
    async fn malformed_event_fails_the_invocation() {
        let notifier = WebhookNotifier::new(StubWebhook::default(), LogResponder);
        let event = LambdaEvent::new(json!(["not", "an", "object"]), Context::default());

        let result = handle_lambda_event(&notifier, event).await;

        assert!(result.is_err());
    }
}

mod invoke {
    use super::*;

    #[tokio::test]
    async fn dry_run_logs_response_and_returns_status() {
        let options = InvokeOptions {
            event_path: "event.json".into(),
            event: event_json("DeleteFunction"),
            send_response: false,
            log_stream: "local-invoke".to_string(),
        };

        let status = invoke(StubWebhook::default(), ReqwestClient::new(), options)
            .await
            .unwrap();

        assert_eq!(status, ResponseStatus::Success);
    }
}
