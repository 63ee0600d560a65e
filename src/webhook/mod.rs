//! Webhook layer for sending HTTP requests to external services.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Webhook delivery with retries ([`WebhookSender`], [`HttpWebhook`])
//! - Retry policy configuration ([`RetryPolicy`])

mod client;
mod error;
mod http;
mod retry;
mod sender;


pub use client::ReqwestClient;
pub use error::{HttpError, RetryableError, WebhookError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use retry::RetryPolicy;
pub use sender::{HttpWebhook, WebhookSender};
