// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for balancescan integration tests
//!
//! Provides a scripted mock [`ChainClient`] to exercise the engine without
//! a real node connection.

use std::collections::HashMap;
use std::sync::Mutex;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use balancescan::{ChainClient, ErrorKind, FetchError};

/// Scripted behavior for one address.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Script {
    /// Always succeed with this balance.
    Balance(U256),
    /// Fail `failures` times with `kind`, then succeed with `wei`.
    FailThenSucceed {
        kind: ErrorKind,
        failures: u32,
        wei: U256,
    },
    /// Fail every attempt with `kind`.
    AlwaysFail(ErrorKind),
    /// Never complete; used for cancellation tests.
    Hang,
}

/// Deterministic mock chain client.
///
/// Unscripted addresses succeed with a balance derived from the address
/// bytes, so identical inputs always produce identical outputs. Attempt
/// counts are recorded per address for retry assertions.
pub struct MockChainClient {
    scripts: HashMap<Address, Script>,
    attempts: Mutex<HashMap<Address, u32>>,
    healthy: bool,
}

#[allow(dead_code)]
impl MockChainClient {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            attempts: Mutex::new(HashMap::new()),
            healthy: true,
        }
    }

    /// A client whose liveness probe always fails.
    pub fn unreachable() -> Self {
        Self {
            healthy: false,
            ..Self::new()
        }
    }

    pub fn with_script(mut self, address: Address, script: Script) -> Self {
        self.scripts.insert(address, script);
        self
    }

    /// How many `get_balance` calls this address has received.
    pub fn attempts_for(&self, address: Address) -> u32 {
        self.attempts
            .lock()
            .unwrap()
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    /// Balance for unscripted addresses: last address byte in milli-ETH.
    pub fn derived_balance(address: Address) -> U256 {
        U256::from(address.as_slice()[19]) * U256::from(10u64.pow(15))
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn get_balance(&self, address: Address) -> Result<U256, FetchError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let count = attempts.entry(address).or_insert(0);
            *count += 1;
            *count
        };

        match self.scripts.get(&address) {
            None => Ok(Self::derived_balance(address)),
            Some(Script::Balance(wei)) => Ok(*wei),
            Some(Script::FailThenSucceed {
                kind,
                failures,
                wei,
            }) => {
                if attempt <= *failures {
                    Err(FetchError::new(*kind, "scripted failure"))
                } else {
                    Ok(*wei)
                }
            }
            Some(Script::AlwaysFail(kind)) => Err(FetchError::new(*kind, "scripted failure")),
            Some(Script::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }

    async fn client_version(&self) -> Result<String, FetchError> {
        if self.healthy {
            Ok("MockChain/v0.1.0".to_string())
        } else {
            Err(FetchError::connection("node unreachable"))
        }
    }
}

/// Distinct test address from a single byte.
#[allow(dead_code)]
pub fn addr(n: u8) -> Address {
    Address::repeat_byte(n)
}
