// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Deterministic rendering of balance outcomes.
//!
//! [`ResultFormatter`] turns the ordered outcome vector into a
//! [`ResultMapping`]: one display string per address, successes as
//! fixed-precision ether amounts, failures as `Error: <kind>`. The mapping
//! serializes as a JSON object whose keys keep their entry order.

use alloy_primitives::Address;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::outcome::{BalanceOutcome, WeiAmount};

/// One rendered entry of the final mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Account address, rendered in EIP-55 checksum form when serialized.
    pub address: Address,
    /// Display string: `"1.0000 ETH"` or `"Error: ConnectionError"`.
    pub display: String,
    wei: Option<WeiAmount>,
}

impl MappingEntry {
    /// The raw balance, if this entry is a success.
    #[must_use]
    pub fn wei(&self) -> Option<WeiAmount> {
        self.wei
    }
}

/// Ordered mapping from address to display string.
///
/// The entry order is the dispatcher's structural input order unless
/// [`sorted_by_balance`](Self::sorted_by_balance) has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMapping {
    entries: Vec<MappingEntry>,
}

impl ResultMapping {
    /// Number of entries; one per scanned address.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter()
    }

    /// Look up the display string for an address.
    #[must_use]
    pub fn get(&self, address: Address) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.address == address)
            .map(|entry| entry.display.as_str())
    }

    /// Presentation reorder: successes before failures, successes by
    /// descending balance, ties and failures stable in original order.
    ///
    /// This does not touch the structural input-order mapping; it returns a
    /// re-sorted copy.
    #[must_use]
    pub fn sorted_by_balance(&self) -> Self {
        let mut entries = self.entries.clone();
        // sort_by is stable, so equal keys keep their original order
        entries.sort_by(|a, b| match (a.wei, b.wei) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Self { entries }
    }

    /// Serialize as a pretty-printed JSON object.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error on failure.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for ResultMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // serialize_map writes keys in iteration order, which preserves the
        // mapping order without an order-preserving map type
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.address.to_checksum(None), &entry.display)?;
        }
        map.end()
    }
}

/// Converts the raw outcome vector into the display mapping.
#[derive(Debug, Clone, Copy)]
pub struct ResultFormatter {
    decimals: u8,
}

impl ResultFormatter {
    /// Create a formatter with the given fractional precision.
    #[must_use]
    pub fn new(decimals: u8) -> Self {
        Self { decimals }
    }

    /// Render every outcome, preserving the input order of `outcomes`.
    #[must_use]
    pub fn format(&self, outcomes: &[BalanceOutcome]) -> ResultMapping {
        let entries = outcomes
            .iter()
            .map(|outcome| match outcome {
                BalanceOutcome::Success { address, wei } => MappingEntry {
                    address: *address,
                    display: format!("{} ETH", wei.to_eth_string(self.decimals)),
                    wei: Some(*wei),
                },
                BalanceOutcome::Failure { address, kind, .. } => MappingEntry {
                    address: *address,
                    display: format!("Error: {kind}"),
                    wei: None,
                },
            })
            .collect();

        ResultMapping { entries }
    }
}
