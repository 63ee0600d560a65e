//! Sleep abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait that allows injecting instant or
//! recording sleepers in tests while using the Tokio timer in production.

use std::future::Future;
use std::time::Duration;

/// Abstraction over async sleeping.
///
/// The webhook retry loop waits between attempts through this trait, so
/// tests can observe the requested delays without actually waiting.
///
/// # Example
///
/// ```
/// use cfn_phonehome::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # async fn example() {
/// InstantSleeper.sleep(Duration::from_secs(60)).await; // returns immediately
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Waits for the given duration.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
///
/// Useful in tests that exercise retry paths without waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
