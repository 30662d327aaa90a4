// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain client abstraction.
//!
//! The engine talks to the node through the [`ChainClient`] trait: one
//! balance query per call plus a liveness probe used once before any fetch
//! begins. [`RpcChainClient`] is the production implementation over an alloy
//! HTTP provider; tests substitute their own deterministic implementations.

mod rpc;

pub use rpc::{NodeConfig, RpcChainClient};

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::errors::FetchError;

/// Balance-query capability against one chain node.
///
/// Implementations are stateless request/response and shared read-only
/// across worker tasks behind an `Arc`; no worker's failure or retry state
/// may leak into another worker's execution.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Fetch the balance of `address` in wei.
    ///
    /// # Errors
    ///
    /// Returns a classified [`FetchError`]; the caller's retry policy uses
    /// the kind to decide whether to try again.
    async fn get_balance(&self, address: Address) -> Result<U256, FetchError>;

    /// Liveness probe, invoked once before any fetch begins.
    ///
    /// Returns the node's self-reported client version string.
    ///
    /// # Errors
    ///
    /// Returns a classified [`FetchError`] if the node cannot be reached.
    async fn client_version(&self) -> Result<String, FetchError>;
}
