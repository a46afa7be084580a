//! Retry orchestration with exponential backoff
//!
//! Drives one logical request through bounded, strictly sequential
//! attempts. Whether a failure is worth another attempt is decided by
//! [`MealSnapError::is_retryable`]; the backoff grows exponentially with
//! jitter and a hard cap. Both the in-flight attempt and the backoff sleep
//! race the caller's cancellation token, so abandoning the call aborts the
//! underlying request instead of leaving it running unsupervised.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{MealSnapError, Result};

/// Retry policy configuration
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempt budget, including the first attempt
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each retry
    pub base_delay: Duration,
    /// Upper bound on any single backoff delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Backoff before the retry following `attempt` (0-indexed):
    /// `min(base * 2^attempt + jitter, max)` with jitter uniformly drawn
    /// from 10-30% of the exponential term. The jitter keeps simultaneous
    /// clients from retrying in lockstep.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponential = self.base_delay.saturating_mul(2u32.saturating_pow(attempt.min(16)));
        let jitter = exponential.mul_f64(0.10 + fastrand::f64() * 0.20);
        exponential.saturating_add(jitter).min(self.max_delay)
    }
}

/// Executor applying a [`RetryPolicy`] to an operation
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` until it succeeds, fails non-retryably, the attempt
    /// budget runs out, or `cancel` fires.
    ///
    /// The operation is invoked once per attempt with the 0-indexed attempt
    /// number and is expected to do its own payload assembly, so nothing is
    /// shared between attempts. Attempts are strictly sequential. On
    /// cancellation the in-flight future is dropped and
    /// [`MealSnapError::Cancelled`] is surfaced, distinct from any network
    /// failure.
    pub async fn execute<T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut operation: F,
    ) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);

        for attempt in 0..max_attempts {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(MealSnapError::Cancelled),
                outcome = operation(attempt) => outcome,
            };

            match outcome {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt + 1 < max_attempts => {
                    let delay = self.policy.backoff_delay(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "attempt failed with retryable error, backing off"
                    );

                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(MealSnapError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                Err(err) => {
                    if err.is_retryable() {
                        tracing::warn!(
                            attempts = attempt + 1,
                            error = %err,
                            "retry budget exhausted"
                        );
                    }
                    return Err(err);
                }
            }
        }

        Err(MealSnapError::internal("Retry loop ended without an outcome"))
    }
}
