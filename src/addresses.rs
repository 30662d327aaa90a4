// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Ordered, deduplicated account address sets.
//!
//! The engine only ever sees pre-validated addresses: lines that fail to
//! parse as a 20-byte hex address are dropped and logged at WARN by the
//! loader, and duplicates are collapsed to their first occurrence. A set
//! that ends up empty is a fatal precondition failure, not an empty run.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use alloy_primitives::Address;
use tracing::{info, warn};

use crate::errors::ScanError;

/// A non-empty, ordered collection of unique account addresses.
///
/// Order is first-seen input order; this is the order the dispatcher
/// preserves in its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSet {
    addresses: Vec<Address>,
}

impl AddressSet {
    /// Build a set from raw address strings.
    ///
    /// Blank lines are skipped, surrounding whitespace is trimmed, invalid
    /// entries are dropped with a warning, and duplicates keep their first
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NoValidAddresses`] if nothing valid remains.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut addresses = Vec::new();

        for line in lines {
            let raw = line.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            match Address::from_str(raw) {
                Ok(address) => {
                    if seen.insert(address) {
                        addresses.push(address);
                    }
                }
                Err(e) => warn!(address = raw, error = %e, "Skipping invalid address"),
            }
        }

        if addresses.is_empty() {
            return Err(ScanError::NoValidAddresses);
        }
        Ok(Self { addresses })
    }

    /// Load a set from a file with one address per line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or yields no valid
    /// addresses.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ScanError::address_file_unreadable(path, e))?;

        let set = Self::from_lines(contents.lines())?;
        info!(count = set.len(), path = %path.display(), "Loaded addresses");
        Ok(set)
    }

    /// Number of addresses in the set. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Always false; an `AddressSet` cannot be constructed empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Iterate over the addresses in input order.
    pub fn iter(&self) -> impl Iterator<Item = Address> + '_ {
        self.addresses.iter().copied()
    }

    /// The addresses as a slice, in input order.
    #[must_use]
    pub fn as_slice(&self) -> &[Address] {
        &self.addresses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
    const BOB: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    #[test]
    fn preserves_input_order() {
        let set = AddressSet::from_lines([ALICE, BOB]).unwrap();
        let ordered: Vec<_> = set.iter().collect();
        assert_eq!(ordered[0], Address::from_str(ALICE).unwrap());
        assert_eq!(ordered[1], Address::from_str(BOB).unwrap());
    }

    #[test]
    fn deduplicates_keeping_first_position() {
        // Same address in different cases is still one address
        let lower = ALICE.to_lowercase();
        let set = AddressSet::from_lines([ALICE, BOB, lower.as_str()]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next().unwrap(), Address::from_str(ALICE).unwrap());
    }

    #[test]
    fn drops_invalid_lines() {
        let set = AddressSet::from_lines(["not-an-address", ALICE, "0x1234"]).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn skips_blank_lines_and_trims() {
        let padded = format!("  {ALICE}  ");
        let set = AddressSet::from_lines(["", padded.as_str(), "   "]).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn empty_input_is_fatal() {
        let result = AddressSet::from_lines(Vec::<&str>::new());
        assert!(matches!(result, Err(ScanError::NoValidAddresses)));
    }

    #[test]
    fn all_invalid_input_is_fatal() {
        let result = AddressSet::from_lines(["garbage", "0xzz"]);
        assert!(matches!(result, Err(ScanError::NoValidAddresses)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AddressSet::load_from_file("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, ScanError::AddressFileUnreadable { .. }));
    }
}
