// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Ordering, partial-failure, and cancellation tests for the dispatcher.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::U256;
use balancescan::{
    dispatcher, AddressSet, BalanceFetcher, BalanceOutcome, ErrorKind, RetryPolicy, ShutdownSignal,
};
use helpers::{addr, MockChainClient, Script};

fn address_set(count: u8) -> AddressSet {
    let lines: Vec<String> = (1..=count).map(|n| addr(n).to_checksum(None)).collect();
    AddressSet::from_lines(&lines).unwrap()
}

fn quick_policy() -> RetryPolicy {
    RetryPolicy::new(1, Duration::from_millis(1), Duration::from_millis(1))
}

#[tokio::test]
async fn returns_one_outcome_per_address_in_input_order() {
    let addresses = address_set(20);
    let fetcher = BalanceFetcher::new(Arc::new(MockChainClient::new()), quick_policy());

    let outcomes = dispatcher::dispatch_all(
        &fetcher,
        &addresses,
        5,
        &ShutdownSignal::disabled(),
    )
    .await;

    assert_eq!(outcomes.len(), addresses.len());
    for (outcome, expected) in outcomes.iter().zip(addresses.iter()) {
        assert_eq!(outcome.address(), expected);
        assert!(outcome.is_success());
    }
}

#[tokio::test]
async fn one_failure_never_aborts_the_others() {
    let mock = MockChainClient::new()
        .with_script(addr(2), Script::AlwaysFail(ErrorKind::ConnectionError))
        .with_script(addr(4), Script::AlwaysFail(ErrorKind::Unknown));
    let addresses = address_set(5);
    let fetcher = BalanceFetcher::new(Arc::new(mock), quick_policy());

    let outcomes =
        dispatcher::dispatch_all(&fetcher, &addresses, 3, &ShutdownSignal::disabled()).await;

    assert_eq!(outcomes.len(), 5);
    assert!(outcomes[0].is_success());
    assert!(!outcomes[1].is_success());
    assert!(outcomes[2].is_success());
    assert!(!outcomes[3].is_success());
    assert!(outcomes[4].is_success());
}

#[tokio::test]
async fn single_worker_and_wide_pool_agree() {
    let addresses = address_set(50);

    let mut per_width = Vec::new();
    for workers in [1usize, 50] {
        let fetcher = BalanceFetcher::new(Arc::new(MockChainClient::new()), quick_policy());
        let outcomes =
            dispatcher::dispatch_all(&fetcher, &addresses, workers, &ShutdownSignal::disabled())
                .await;
        per_width.push(outcomes);
    }

    assert_eq!(per_width[0], per_width[1]);
}

#[tokio::test]
async fn retries_happen_per_address() {
    let mock = Arc::new(
        MockChainClient::new().with_script(
            addr(1),
            Script::FailThenSucceed {
                kind: ErrorKind::Timeout,
                failures: 2,
                wei: U256::from(7u64),
            },
        ),
    );
    let policy = RetryPolicy::new(4, Duration::from_millis(1), Duration::from_millis(2));
    let fetcher = BalanceFetcher::new(Arc::clone(&mock) as Arc<dyn balancescan::ChainClient>, policy);
    let addresses = address_set(3);

    let outcomes =
        dispatcher::dispatch_all(&fetcher, &addresses, 3, &ShutdownSignal::disabled()).await;

    assert!(outcomes.iter().all(BalanceOutcome::is_success));
    assert_eq!(mock.attempts_for(addr(1)), 3);
    // Untroubled addresses are fetched exactly once
    assert_eq!(mock.attempts_for(addr(2)), 1);
    assert_eq!(mock.attempts_for(addr(3)), 1);
}

#[tokio::test]
async fn shutdown_reports_unfinished_addresses_as_cancelled() {
    let mut mock = MockChainClient::new();
    for n in 1..=8 {
        mock = mock.with_script(addr(n), Script::Hang);
    }
    let fetcher = BalanceFetcher::new(Arc::new(mock), quick_policy());
    let addresses = address_set(8);

    let (handle, shutdown) = ShutdownSignal::new();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.shutdown();
    });

    let outcomes = dispatcher::dispatch_all(&fetcher, &addresses, 4, &shutdown).await;

    assert_eq!(outcomes.len(), 8);
    for outcome in &outcomes {
        match outcome {
            BalanceOutcome::Failure { kind, .. } => assert_eq!(*kind, ErrorKind::Cancelled),
            BalanceOutcome::Success { .. } => panic!("hanging fetch cannot succeed"),
        }
    }
}

#[tokio::test]
async fn shutdown_preserves_completed_outcomes() {
    let mock = MockChainClient::new()
        .with_script(addr(2), Script::Hang)
        .with_script(addr(3), Script::Hang);
    let fetcher = BalanceFetcher::new(Arc::new(mock), quick_policy());
    let addresses = address_set(3);

    let (handle, shutdown) = ShutdownSignal::new();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.shutdown();
    });

    let outcomes = dispatcher::dispatch_all(&fetcher, &addresses, 3, &shutdown).await;

    // The quick fetch finished before the interrupt and is preserved
    assert!(outcomes[0].is_success());
    assert!(!outcomes[1].is_success());
    assert!(!outcomes[2].is_success());
}
