// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the balancescan library.
//!
//! Two layers, matching the propagation policy:
//!
//! - [`FetchError`] with its [`ErrorKind`] taxonomy describes the failure of
//!   one balance query attempt and drives retry decisions. These never abort
//!   the run; they end up as failure entries in the result mapping.
//! - [`ScanError`] covers run-fatal conditions only: no valid addresses,
//!   unreachable node, invalid configuration, report I/O.

mod kind;
mod scan;

pub use kind::{ErrorKind, FetchError};
pub use scan::ScanError;
