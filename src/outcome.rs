// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Value objects produced by the balance engine.
//!
//! [`WeiAmount`] keeps balances in the chain's smallest unit as an
//! arbitrary-precision integer; the ether rendering is done with integer
//! division so large balances never drift through binary floating point.
//! [`BalanceOutcome`] is the immutable per-address result: created once by
//! the fetcher, consumed once by the formatter.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorKind, FetchError};

/// Number of wei in one ether (10^18).
fn wei_per_eth() -> U256 {
    U256::from(1_000_000_000_000_000_000u128)
}

/// An amount of native currency in wei.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use balancescan::WeiAmount;
///
/// let one_eth = WeiAmount::new(U256::from(1_000_000_000_000_000_000u128));
/// assert_eq!(one_eth.to_eth_string(4), "1.0000");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default, Hash,
)]
#[serde(transparent)]
pub struct WeiAmount(U256);

impl WeiAmount {
    /// Zero wei.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new wei amount.
    pub const fn new(wei: U256) -> Self {
        Self(wei)
    }

    /// Get the inner U256 value (in wei).
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Check if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Render as a decimal ether string with `decimals` fractional digits.
    ///
    /// The division is pure integer arithmetic: whole ether via `U256`
    /// division, fractional digits via the remainder, truncated (not
    /// rounded) to the requested precision. Precisions beyond 18 digits are
    /// clamped to 18, the full wei resolution.
    ///
    /// # Examples
    ///
    /// ```
    /// use alloy_primitives::U256;
    /// use balancescan::WeiAmount;
    ///
    /// // 1.5 ETH
    /// let amount = WeiAmount::new(U256::from(1_500_000_000_000_000_000u128));
    /// assert_eq!(amount.to_eth_string(4), "1.5000");
    /// assert_eq!(amount.to_eth_string(0), "1");
    /// ```
    #[must_use]
    pub fn to_eth_string(&self, decimals: u8) -> String {
        let divisor = wei_per_eth();
        let whole = self.0 / divisor;
        let frac = self.0 % divisor;

        if decimals == 0 {
            return whole.to_string();
        }

        let decimals = usize::from(decimals.min(18));
        let frac_digits = format!("{:0>18}", frac.to_string());
        format!("{}.{}", whole, &frac_digits[..decimals])
    }
}

impl From<u64> for WeiAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for WeiAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for WeiAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wei", self.0)
    }
}

/// The result of one address's balance query.
///
/// Exactly one outcome exists per input address per run. Outcomes are value
/// objects: no mutation after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceOutcome {
    /// The query succeeded.
    Success {
        /// Address the balance belongs to.
        address: Address,
        /// Balance in wei.
        wei: WeiAmount,
    },
    /// The query failed terminally (after any retries).
    Failure {
        /// Address the query was for.
        address: Address,
        /// Classification of the final failure.
        kind: ErrorKind,
        /// Detail from the final failure.
        message: String,
    },
}

impl BalanceOutcome {
    /// Successful outcome for `address`.
    pub fn success(address: Address, wei: impl Into<WeiAmount>) -> Self {
        BalanceOutcome::Success {
            address,
            wei: wei.into(),
        }
    }

    /// Failed outcome for `address`, taking the kind and message from `err`.
    pub fn failure(address: Address, err: FetchError) -> Self {
        BalanceOutcome::Failure {
            address,
            kind: err.kind,
            message: err.message,
        }
    }

    /// Failure outcome for an address whose query was interrupted.
    pub fn cancelled(address: Address) -> Self {
        Self::failure(address, FetchError::cancelled())
    }

    /// The address this outcome belongs to.
    pub fn address(&self) -> Address {
        match self {
            BalanceOutcome::Success { address, .. } | BalanceOutcome::Failure { address, .. } => {
                *address
            }
        }
    }

    /// The balance, if the query succeeded.
    pub fn wei(&self) -> Option<WeiAmount> {
        match self {
            BalanceOutcome::Success { wei, .. } => Some(*wei),
            BalanceOutcome::Failure { .. } => None,
        }
    }

    /// Whether the query succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, BalanceOutcome::Success { .. })
    }
}
