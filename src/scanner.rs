// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Top-level scan engine.
//!
//! Wires the pieces together: connectivity pre-check, concurrent dispatch,
//! formatting. Per-address failures degrade to entries in the mapping; only
//! an unreachable node (or invalid configuration at construction) is fatal.

use std::sync::Arc;

use tracing::info;

use crate::addresses::AddressSet;
use crate::client::ChainClient;
use crate::config::ScanConfig;
use crate::dispatcher;
use crate::errors::ScanError;
use crate::fetcher::BalanceFetcher;
use crate::format::{ResultFormatter, ResultMapping};
use crate::retry::RetryPolicy;
use crate::shutdown::ShutdownSignal;

/// The balance scan engine.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use balancescan::{
///     AddressSet, BalanceScanner, NodeConfig, RpcChainClient, ScanConfig, ShutdownSignal,
/// };
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let addresses = AddressSet::load_from_file("wallets.txt")?;
/// let config = ScanConfig::default();
/// let node = NodeConfig::for_scan("https://eth.llamarpc.com", &config);
/// let client = RpcChainClient::connect(&node)?;
/// let scanner = BalanceScanner::new(Arc::new(client), config)?;
///
/// let mapping = scanner.run(&addresses, &ShutdownSignal::disabled()).await?;
/// println!("{}", mapping.to_json_pretty()?);
/// # Ok(())
/// # }
/// ```
pub struct BalanceScanner {
    client: Arc<dyn ChainClient>,
    config: ScanConfig,
}

impl BalanceScanner {
    /// Create a scanner over a shared chain client.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidConfig`] if the configuration fails
    /// validation.
    pub fn new(client: Arc<dyn ChainClient>, config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;
        Ok(Self { client, config })
    }

    /// The configuration this scanner runs with.
    #[must_use]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Run the full scan over `addresses`.
    ///
    /// Performs the connectivity pre-check, fans the queries out over the
    /// worker pool, and renders the ordered mapping. Running twice against a
    /// deterministic client yields identical mappings.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NodeUnreachable`] if the pre-check fails. No
    /// fetches are attempted in that case.
    pub async fn run(
        &self,
        addresses: &AddressSet,
        shutdown: &ShutdownSignal,
    ) -> Result<ResultMapping, ScanError> {
        let version = self
            .client
            .client_version()
            .await
            .map_err(ScanError::NodeUnreachable)?;
        info!(node = %version, "Connected to chain node");

        let policy = RetryPolicy::from_config(&self.config);
        let fetcher = BalanceFetcher::new(Arc::clone(&self.client), policy);
        let outcomes =
            dispatcher::dispatch_all(&fetcher, addresses, self.config.workers, shutdown).await;

        let ok = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            total = outcomes.len(),
            ok,
            failed = outcomes.len() - ok,
            "Scan complete"
        );

        Ok(ResultFormatter::new(self.config.display_decimals).format(&outcomes))
    }
}
