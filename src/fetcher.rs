// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-address balance fetching.
//!
//! Glue between the chain client and the retry policy: one call in, one
//! [`BalanceOutcome`] out. Errors never propagate past this layer.

use std::sync::Arc;

use alloy_primitives::Address;
use tracing::{debug, warn};

use crate::client::ChainClient;
use crate::outcome::BalanceOutcome;
use crate::retry::RetryPolicy;

/// Executes one address's query through the retry policy and classifies the
/// result.
#[derive(Clone)]
pub struct BalanceFetcher {
    client: Arc<dyn ChainClient>,
    policy: RetryPolicy,
}

impl BalanceFetcher {
    /// Create a fetcher over a shared chain client.
    pub fn new(client: Arc<dyn ChainClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetch the balance of `address`.
    ///
    /// Never fails: any error from the chain client, after the retry budget
    /// is spent or immediately for non-retryable kinds, is converted into a
    /// `Failure` outcome carrying the classified kind.
    pub async fn fetch(&self, address: Address) -> BalanceOutcome {
        let result = self
            .policy
            .execute(|| {
                let client = Arc::clone(&self.client);
                async move { client.get_balance(address).await }
            })
            .await;

        match result {
            Ok(wei) => {
                debug!(%address, %wei, "Balance fetched");
                BalanceOutcome::success(address, wei)
            }
            Err(err) => {
                warn!(%address, kind = %err.kind, error = %err.message, "Balance fetch failed");
                BalanceOutcome::failure(address, err)
            }
        }
    }
}
