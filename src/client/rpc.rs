// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! `ChainClient` over an alloy HTTP provider.

use std::borrow::Cow;
use std::time::Duration;

use alloy_network::Ethereum;
use alloy_primitives::{Address, U256};
use alloy_provider::{Provider, ProviderBuilder, RootProvider};
use async_trait::async_trait;
use tokio::time::timeout;
use tracing::debug;

use super::ChainClient;
use crate::config::ScanConfig;
use crate::errors::{FetchError, ScanError};

/// Connection settings for the JSON-RPC node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// RPC endpoint URL.
    pub url: String,
    /// Time budget for a single RPC round trip.
    pub request_timeout: Duration,
}

impl NodeConfig {
    /// Create a configuration with the default 10 second request timeout.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Create a configuration carrying the scan's per-request timeout.
    ///
    /// Preferred over [`new`](Self::new) when a [`ScanConfig`] exists, so
    /// the timeout the scan was configured with is the one the client
    /// enforces.
    #[must_use]
    pub fn for_scan(url: impl Into<String>, config: &ScanConfig) -> Self {
        Self {
            url: url.into(),
            request_timeout: config.request_timeout,
        }
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

/// HTTP JSON-RPC chain client.
///
/// The provider is stateless and cheap to clone; one instance is shared
/// across all worker tasks. The per-request timeout is enforced here with
/// `tokio::time::timeout` and its expiry classified as a retryable
/// `Timeout`.
#[derive(Debug, Clone)]
pub struct RpcChainClient {
    provider: RootProvider<Ethereum>,
    request_timeout: Duration,
}

impl RpcChainClient {
    /// Build a client for the configured endpoint.
    ///
    /// This only parses the URL and constructs the provider; no request is
    /// sent until [`client_version`](ChainClient::client_version) or
    /// [`get_balance`](ChainClient::get_balance) is called.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NodeUrlInvalid`] if the URL does not parse.
    pub fn connect(config: &NodeConfig) -> Result<Self, ScanError> {
        let url: url::Url = config
            .url
            .parse()
            .map_err(|_| ScanError::NodeUrlInvalid(config.url.clone()))?;

        // Bare RootProvider without fillers; balance reads need none
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<Ethereum>()
            .connect_http(url);

        Ok(Self {
            provider,
            request_timeout: config.request_timeout,
        })
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn get_balance(&self, address: Address) -> Result<U256, FetchError> {
        match timeout(self.request_timeout, self.provider.get_balance(address)).await {
            Ok(Ok(wei)) => {
                debug!(%address, %wei, "Fetched balance");
                Ok(wei)
            }
            Ok(Err(err)) => Err(FetchError::classify(err)),
            Err(_) => Err(FetchError::timeout(format!(
                "eth_getBalance for {address} exceeded {:?}",
                self.request_timeout
            ))),
        }
    }

    async fn client_version(&self) -> Result<String, FetchError> {
        let request = self
            .provider
            .raw_request::<(), String>(Cow::Borrowed("web3_clientVersion"), ());

        match timeout(self.request_timeout, request).await {
            Ok(Ok(version)) => Ok(version),
            Ok(Err(err)) => Err(FetchError::classify(err)),
            Err(_) => Err(FetchError::timeout(format!(
                "web3_clientVersion exceeded {:?}",
                self.request_timeout
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_rejects_invalid_url() {
        let result = RpcChainClient::connect(&NodeConfig::new("not a url"));
        assert!(matches!(result, Err(ScanError::NodeUrlInvalid(_))));
    }

    #[test]
    fn connect_accepts_valid_url_without_io() {
        let result = RpcChainClient::connect(&NodeConfig::new("http://localhost:8545"));
        assert!(result.is_ok());
    }

    #[test]
    fn node_config_builder() {
        let config = NodeConfig::new("http://localhost:8545").with_timeout(Duration::from_secs(3));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn for_scan_carries_the_scan_timeout() {
        let scan = ScanConfig::default().with_request_timeout(Duration::from_secs(7));
        let config = NodeConfig::for_scan("http://localhost:8545", &scan);
        assert_eq!(config.request_timeout, Duration::from_secs(7));
    }
}
