// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded concurrent fan-out over an address set.
//!
//! One task per address, admitted through a semaphore of `workers` permits.
//! Tasks complete in arbitrary order; each outcome is recorded against its
//! input index and the final vector is re-emitted in input order. This is
//! the ordering guarantee callers rely on for reproducible output.
//!
//! Cancellation: once the shutdown signal fires, no further tasks are
//! admitted past the semaphore, in-flight fetches are abandoned, and every
//! address without a completed outcome is reported as a `Cancelled` failure.
//! Already-completed outcomes are preserved.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::addresses::AddressSet;
use crate::fetcher::BalanceFetcher;
use crate::outcome::BalanceOutcome;
use crate::shutdown::ShutdownSignal;

/// Fetch every address's balance with at most `workers` queries in flight.
///
/// Returns exactly one outcome per input address, in input order, regardless
/// of completion order. One address's failure never aborts or delays the
/// others beyond worker contention.
///
/// `workers` must be >= 1; [`ScanConfig::validate`](crate::ScanConfig::validate)
/// enforces this before the engine runs.
pub async fn dispatch_all(
    fetcher: &BalanceFetcher,
    addresses: &AddressSet,
    workers: usize,
    shutdown: &ShutdownSignal,
) -> Vec<BalanceOutcome> {
    let total = addresses.len();
    info!(total, workers, "Dispatching balance queries");

    let semaphore = Arc::new(Semaphore::new(workers));
    let mut tasks: JoinSet<(usize, BalanceOutcome)> = JoinSet::new();

    for (index, address) in addresses.iter().enumerate() {
        if shutdown.is_triggered() {
            debug!(admitted = index, "Shutdown observed, not admitting further tasks");
            break;
        }

        let semaphore = Arc::clone(&semaphore);
        let fetcher = fetcher.clone();
        let shutdown = shutdown.clone();

        tasks.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                // Semaphore is never closed; treat it as cancellation anyway
                Err(_) => return (index, BalanceOutcome::cancelled(address)),
            };
            if shutdown.is_triggered() {
                return (index, BalanceOutcome::cancelled(address));
            }

            tokio::select! {
                outcome = fetcher.fetch(address) => (index, outcome),
                () = shutdown.triggered() => (index, BalanceOutcome::cancelled(address)),
            }
        });
    }

    let mut slots: Vec<Option<BalanceOutcome>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => slots[index] = Some(outcome),
            Err(err) => warn!(error = %err, "Balance task did not complete"),
        }
    }

    // Re-emit in submission order; anything without a recorded outcome
    // (never admitted, or its task died) is reported, not omitted.
    slots
        .into_iter()
        .zip(addresses.iter())
        .map(|(slot, address)| slot.unwrap_or_else(|| BalanceOutcome::cancelled(address)))
        .collect()
}
