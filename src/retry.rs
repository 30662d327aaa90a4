// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded exponential backoff for fallible async operations.
//!
//! The policy is fixed per run, not per address. Retry state (attempt
//! counter and current delay) lives in the locals of one `execute` call and
//! is never shared between in-flight fetches. The backoff sleep is
//! `tokio::time::sleep`, so it suspends only the calling task.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::ScanConfig;
use crate::errors::FetchError;

/// Retries an operation with exponentially increasing, capped delays.
///
/// - Success returns immediately; no further attempts, no delay.
/// - A non-retryable error returns immediately regardless of budget.
/// - A retryable error sleeps the current delay, doubles it capped at
///   `max_delay`, and tries again until `max_attempts` is exhausted; the
///   last failure is returned.
///
/// With `max_attempts == 1` a single failure is terminal.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` counts the first attempt; a value of
    /// zero is treated as one.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: max_delay.max(base_delay),
        }
    }

    /// Build a policy from the retry fields of a [`ScanConfig`].
    #[must_use]
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.max_attempts, config.base_delay, config.max_delay)
    }

    /// The attempt budget, including the first attempt.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `operation` under this policy.
    ///
    /// # Errors
    ///
    /// Returns the first non-retryable error, or the last retryable error
    /// once the attempt budget is exhausted.
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut delay = self.base_delay;
        let mut attempt = 1u32;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) if attempt >= self.max_attempts => {
                    warn!(attempts = attempt, error = %err, "Retry budget exhausted");
                    return Err(err);
                }
                Err(err) => {
                    debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Attempt failed, backing off"
                    );
                    sleep(delay).await;
                    delay = (delay * 2).min(self.max_delay);
                    attempt += 1;
                }
            }
        }
    }
}
