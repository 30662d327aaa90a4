// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Run-fatal errors.
//!
//! Per-address failures never surface here; they degrade to
//! [`BalanceOutcome::Failure`](crate::BalanceOutcome) entries in the result
//! mapping. `ScanError` is reserved for the conditions that abort the whole
//! run: an empty validated address set, an unreachable node, an invalid
//! configuration, and report I/O failures.

use std::path::Path;

use super::FetchError;

/// Errors that abort a balance scan before or after dispatch.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The input yielded zero valid addresses; the engine refuses to start.
    #[error("no valid addresses to scan")]
    NoValidAddresses,

    /// The address file could not be read.
    #[error("failed to read address file {path}")]
    AddressFileUnreadable {
        /// Path that was attempted.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The node URL could not be parsed.
    #[error("invalid node URL: {0}")]
    NodeUrlInvalid(String),

    /// The connectivity pre-check failed; no fetches were attempted.
    #[error("cannot reach chain node: {0}")]
    NodeUnreachable(#[source] FetchError),

    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// The result mapping could not be serialized.
    #[error("failed to encode report as JSON")]
    ReportEncodeFailed {
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The report file could not be written.
    #[error("failed to write report to {path}")]
    ReportWriteFailed {
        /// Path that was attempted.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Helper to create an `AddressFileUnreadable` error.
    pub fn address_file_unreadable(path: &Path, source: std::io::Error) -> Self {
        ScanError::AddressFileUnreadable {
            path: path.display().to_string(),
            source,
        }
    }

    /// Helper to create an `InvalidConfig` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        ScanError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Helper to create a `ReportWriteFailed` error.
    pub fn report_write_failed(path: &Path, source: std::io::Error) -> Self {
        ScanError::ReportWriteFailed {
            path: path.display().to_string(),
            source,
        }
    }
}
