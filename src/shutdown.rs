// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cooperative cancellation of an in-flight scan.
//!
//! Built on a `tokio::sync::watch` channel. The handle side is triggered
//! once (typically from a Ctrl-C handler); every worker task holds a cheap
//! clone of the signal side and races it against its fetch.

use tokio::sync::watch;

/// Sending half of the stop signal. Trigger with [`shutdown`](Self::shutdown).
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Request cancellation. Idempotent; later calls are no-ops.
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

/// Receiving half of the stop signal. Cloned into every worker task.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Create a connected handle/signal pair.
    #[must_use]
    pub fn new() -> (ShutdownHandle, ShutdownSignal) {
        let (tx, rx) = watch::channel(false);
        (ShutdownHandle { tx }, ShutdownSignal { rx })
    }

    /// A signal that can never fire, for runs without external cancellation.
    #[must_use]
    pub fn disabled() -> ShutdownSignal {
        let (_tx, rx) = watch::channel(false);
        ShutdownSignal { rx }
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is requested; pends forever otherwise,
    /// including when the handle was dropped without triggering.
    pub async fn triggered(&self) {
        let mut rx = self.rx.clone();
        if *rx.borrow() {
            return;
        }
        while rx.changed().await.is_ok() {
            if *rx.borrow() {
                return;
            }
        }
        // Handle dropped without ever triggering
        std::future::pending::<()>().await;
    }
}
