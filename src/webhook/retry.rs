//! Retry policy for webhook delivery.

use std::time::Duration;

use crate::config::defaults;

/// Exponential backoff budget for one delivery.
///
/// The delay before retry `n` (0-indexed) is `initial_delay * multiplier^n`.
/// With the defaults (3 attempts, 1s, ×2) the waits are 1s and then 2s, and
/// nothing after the third attempt.
///
/// # Example
///
/// ```
/// use cfn_phonehome::webhook::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.delay_for_retry(0), Duration::from_secs(1));
/// assert_eq!(policy.delay_for_retry(1), Duration::from_secs(2));
/// assert!(!policy.should_retry(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt).
    ///
    /// A value of 1 means no retries; only the initial attempt is made.
    pub max_attempts: u32,

    /// Delay before the first retry.
    pub initial_delay: Duration,

    /// Multiplier applied to the delay after each retry.
    pub multiplier: f64,
}

impl RetryPolicy {
    /// Creates a retry policy with the default budget.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: defaults::RETRY_MAX_ATTEMPTS,
            initial_delay: defaults::retry_initial_delay(),
            multiplier: defaults::RETRY_MULTIPLIER,
        }
    }

    /// Computes the delay for a given retry number (0 = before the second attempt).
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        // Retry counts are tiny; the cast cannot wrap in practice
        #[allow(clippy::cast_possible_wrap)]
        let multiplier = self.multiplier.powi(retry as i32);
        Duration::from_secs_f64(self.initial_delay.as_secs_f64() * multiplier)
    }

    /// Returns true if another attempt may follow attempt number `attempt` (1-indexed).
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
