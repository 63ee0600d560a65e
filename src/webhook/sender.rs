//! Webhook sender trait and HTTP implementation.

use crate::cfn::OutboundPayload;
use crate::time::{Sleeper, TokioSleeper};

use super::{HttpClient, HttpRequest, RetryPolicy, RetryableError, WebhookError};

/// Trait for delivering a payload to its webhook.
///
/// Implementations handle retries internally, returning
/// [`WebhookError::MaxRetriesExceeded`] when every attempt fails.
pub trait WebhookSender: Send + Sync {
    /// Delivers `payload` to [`OutboundPayload::url`].
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError`] if the payload cannot be encoded or the
    /// delivery fails after all retries.
    fn send(
        &self,
        payload: &OutboundPayload,
    ) -> impl std::future::Future<Output = Result<(), WebhookError>> + Send;
}

/// HTTP webhook sender with bounded retries.
///
/// POSTs the payload as `application/json`. Any status outside `[200, 300)`
/// and any transport error counts as a failed attempt; failed attempts are
/// retried with exponential backoff until the [`RetryPolicy`] budget is
/// spent.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used between attempts (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```
/// use cfn_phonehome::webhook::{HttpWebhook, ReqwestClient, RetryPolicy};
///
/// let webhook = HttpWebhook::new(ReqwestClient::new())
///     .with_retry_policy(RetryPolicy::default());
/// assert_eq!(webhook.retry_policy().max_attempts, 3);
/// ```
#[derive(Debug)]
pub struct HttpWebhook<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    retry_policy: RetryPolicy,
}

impl<H> HttpWebhook<H, TokioSleeper> {
    /// Creates a webhook sender with the default retry policy and
    /// [`TokioSleeper`] for delays.
    #[must_use]
    pub fn new(client: H) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl<H, S> HttpWebhook<H, S> {
    /// Sets a custom sleeper for retry delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> HttpWebhook<H, S2> {
        HttpWebhook {
            client: self.client,
            sleeper,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

impl<H: HttpClient, S: Sleeper> HttpWebhook<H, S> {
    /// Executes a single attempt.
    async fn execute_request(&self, request: &HttpRequest) -> Result<(), RetryableError> {
        let response = self.client.request(request.clone()).await?;

        if response.is_success() {
            tracing::debug!(body = response.body_text().unwrap_or_default(), "Webhook response");
            return Ok(());
        }

        Err(RetryableError::NonSuccessStatus {
            status: response.status,
            body: response.body_text().map(ToString::to_string),
        })
    }

    async fn send_with_retry(&self, payload: &OutboundPayload) -> Result<(), WebhookError> {
        let request = HttpRequest::post(payload.url().clone())
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            )
            .with_body(payload.to_json()?);

        let max_attempts = self.retry_policy.max_attempts;
        let mut attempt = 1;

        loop {
            let error = match self.execute_request(&request).await {
                Ok(()) => {
                    tracing::info!(
                        attempt,
                        max_attempts,
                        url = %payload.url(),
                        "Webhook delivered"
                    );
                    return Ok(());
                }
                Err(e) => e,
            };

            tracing::warn!(
                attempt,
                max_attempts,
                url = %payload.url(),
                "Webhook attempt failed: {error}"
            );

            // No sleep after the last attempt
            if !self.retry_policy.should_retry(attempt) {
                return Err(WebhookError::MaxRetriesExceeded {
                    attempts: attempt,
                    last_error: error,
                });
            }

            let delay = self.retry_policy.delay_for_retry(attempt - 1);
            tracing::debug!(?delay, "Waiting before next webhook attempt");
            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }
}

impl<H: HttpClient, S: Sleeper> WebhookSender for HttpWebhook<H, S> {
    async fn send(&self, payload: &OutboundPayload) -> Result<(), WebhookError> {
        self.send_with_retry(payload).await
    }
}
