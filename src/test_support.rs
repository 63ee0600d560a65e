//! Shared test doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};

use crate::cfn::{CustomResourceEvent, InvocationContext, RespondError, Responder, ResponseSignal};
use crate::time::Sleeper;
use crate::webhook::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Mock HTTP client that returns a scripted sequence of results.
///
/// Once the script is exhausted every further request gets a 200.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            ..Self::default()
        }
    }

    pub fn success() -> Self {
        Self::new(vec![Ok(HttpResponse::with_status(http::StatusCode::OK))])
    }

    pub fn statuses(statuses: &[u16]) -> Self {
        Self::new(
            statuses
                .iter()
                .map(|s| Ok(HttpResponse::with_status(http::StatusCode::from_u16(*s).unwrap())))
                .collect(),
        )
    }

    pub fn connection_errors(count: usize) -> Self {
        Self::new(
            (0..count)
                .map(|_| Err(HttpError::Connection("connection refused".into())))
                .collect(),
        )
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(HttpResponse::with_status(http::StatusCode::OK))
        } else {
            responses.remove(0)
        }
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

/// Sleeper that records requested delays and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for Arc<RecordingSleeper> {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// Responder that records every signal it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingResponder {
    signals: Mutex<Vec<ResponseSignal>>,
}

impl RecordingResponder {
    pub fn signals(&self) -> Vec<ResponseSignal> {
        self.signals.lock().unwrap().clone()
    }
}

impl Responder for Arc<RecordingResponder> {
    async fn respond(
        &self,
        _event: &CustomResourceEvent,
        _context: &InvocationContext,
        signal: &ResponseSignal,
    ) -> Result<(), RespondError> {
        self.signals.lock().unwrap().push(signal.clone());
        Ok(())
    }
}

/// A complete custom-resource event for `request_type` targeting `url`.
pub fn event_json(request_type: &str, url: &str) -> Value {
    json!({
        "RequestType": request_type,
        "ResponseURL": "https://cloudformation-custom-resource-response.s3.amazonaws.com/signed",
        "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/demo/guid",
        "RequestId": "req-1",
        "ResourceType": "Custom::PhoneHome",
        "LogicalResourceId": "PhoneHome",
        "ResourceProperties": {
            "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:phonehome",
            "url": url,
            "install_id": "inst-42"
        }
    })
}

pub fn event(request_type: &str, url: &str) -> CustomResourceEvent {
    CustomResourceEvent::from_value(event_json(request_type, url)).unwrap()
}

pub fn context() -> InvocationContext {
    InvocationContext::new("lambda-req-1", "2026/10/19/[$LATEST]abcdef")
}
