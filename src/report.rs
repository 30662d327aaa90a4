// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! JSON export of scan results.

use std::path::Path;

use tracing::info;

use crate::errors::ScanError;
use crate::format::ResultMapping;

/// Write the mapping to `path` as pretty-printed JSON.
///
/// Write failures are surfaced, never swallowed.
///
/// # Errors
///
/// Returns [`ScanError::ReportEncodeFailed`] or
/// [`ScanError::ReportWriteFailed`].
pub fn save_report(mapping: &ResultMapping, path: impl AsRef<Path>) -> Result<(), ScanError> {
    let path = path.as_ref();

    let json = serde_json::to_string_pretty(mapping)
        .map_err(|source| ScanError::ReportEncodeFailed { source })?;
    std::fs::write(path, json).map_err(|e| ScanError::report_write_failed(path, e))?;

    info!(path = %path.display(), "Report saved");
    Ok(())
}
