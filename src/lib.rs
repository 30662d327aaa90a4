// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Concurrent EVM wallet balance scanner.
//!
//! Queries the native-token balance of many account addresses against a
//! JSON-RPC node with a bounded worker pool, per-call retry with exponential
//! backoff, and deterministic input-ordered output.
//!
//! # Overview
//!
//! - [`AddressSet`] loads, validates, and deduplicates addresses.
//! - [`ChainClient`] abstracts the node; [`RpcChainClient`] implements it
//!   over an alloy HTTP provider.
//! - [`RetryPolicy`] wraps each query with bounded exponential backoff;
//!   [`ErrorKind`] decides what is retryable.
//! - [`dispatcher::dispatch_all`] fans queries out over a semaphore-bounded
//!   pool and re-emits outcomes in input order.
//! - [`ResultFormatter`] renders the final ordered mapping; [`report`]
//!   writes it to disk.
//!
//! Per-address failures never abort a run; they become `Error: <kind>`
//! entries in the mapping. Only an empty address set, an unreachable node,
//! or an invalid configuration is fatal.

pub mod addresses;
pub mod client;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod fetcher;
pub mod format;
pub mod outcome;
pub mod report;
pub mod retry;
pub mod scanner;
pub mod shutdown;

pub use addresses::AddressSet;
pub use client::{ChainClient, NodeConfig, RpcChainClient};
pub use config::ScanConfig;
pub use errors::{ErrorKind, FetchError, ScanError};
pub use fetcher::BalanceFetcher;
pub use format::{MappingEntry, ResultFormatter, ResultMapping};
pub use outcome::{BalanceOutcome, WeiAmount};
pub use retry::RetryPolicy;
pub use scanner::BalanceScanner;
pub use shutdown::{ShutdownHandle, ShutdownSignal};
