// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Scan configuration.
//!
//! All tuning knobs are fixed per run and passed explicitly into the engine
//! at construction; there is no ambient or global state.

use std::time::Duration;

use crate::errors::ScanError;

/// Tuning knobs for a balance scan.
///
/// # Example
///
/// ```
/// use balancescan::ScanConfig;
///
/// let config = ScanConfig::default()
///     .with_workers(25)
///     .with_max_attempts(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Number of concurrent workers (must be >= 1).
    pub workers: usize,
    /// Attempts per address including the first (must be >= 1).
    pub max_attempts: u32,
    /// Delay before the first retry (must be > 0).
    pub base_delay: Duration,
    /// Backoff cap (must be >= `base_delay`).
    pub max_delay: Duration,
    /// Time budget for a single RPC round trip.
    ///
    /// Enforced by the chain client, not the scanner: thread it into the
    /// client via [`NodeConfig::for_scan`](crate::NodeConfig::for_scan)
    /// (or `with_timeout`) when constructing an
    /// [`RpcChainClient`](crate::RpcChainClient).
    pub request_timeout: Duration,
    /// Fractional digits in displayed ether balances.
    pub display_decimals: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            max_attempts: 4,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(4),
            request_timeout: Duration::from_secs(10),
            display_decimals: 4,
        }
    }
}

impl ScanConfig {
    /// Set the worker count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the retry attempt budget.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the initial backoff delay.
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Set the backoff cap.
    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Set the display precision.
    #[must_use]
    pub fn with_display_decimals(mut self, display_decimals: u8) -> Self {
        self.display_decimals = display_decimals;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidConfig`] if any value is out of range:
    /// zero workers, zero attempts, zero base delay, or a cap below the base
    /// delay.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.workers == 0 {
            return Err(ScanError::invalid_config("workers must be >= 1"));
        }
        if self.max_attempts == 0 {
            return Err(ScanError::invalid_config("max_attempts must be >= 1"));
        }
        if self.base_delay.is_zero() {
            return Err(ScanError::invalid_config("base_delay must be > 0"));
        }
        if self.max_delay < self.base_delay {
            return Err(ScanError::invalid_config("max_delay must be >= base_delay"));
        }
        Ok(())
    }
}
