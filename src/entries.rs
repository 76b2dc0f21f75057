//! Payment entry loading and validation
//!
//! The entry file is a JSON array of `{"amount": "...", "address": "..."}`
//! records. Loading and validation are separate stages: [`load_entries`] only
//! reads and deserializes, [`validate_entries`] parses every amount and
//! address up front so that nothing is submitted if any record is bad.

use crate::address::TonAddress;
use crate::error::{Error, Result};
use crate::types::utils::parse_ton;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One payment record as it appears in the entry file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEntry {
    /// Amount in TON as a decimal string
    pub amount: String,
    /// Destination address in friendly form
    pub address: String,
}

/// A payment entry after strict parsing
///
/// The amount is held as exact nanotons; the destination is fully parsed so
/// downstream stages never touch raw strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntry {
    pub destination: TonAddress,
    pub amount: u64,
}

/// Load payment entries from a JSON file
///
/// Fails with [`Error::Io`] if the file cannot be read and [`Error::Format`]
/// if the content is not a well-formed entry array.
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<PaymentEntry>> {
    let data = fs::read_to_string(path)?;
    let entries: Vec<PaymentEntry> = serde_json::from_str(&data)?;
    Ok(entries)
}

/// Validate all entries, converting amounts to nanotons and parsing addresses
///
/// The whole list is validated before anything else happens; the first
/// malformed record aborts with the entry index attached, so a bad record
/// deep in the list can never follow an already-submitted batch.
pub fn validate_entries(entries: &[PaymentEntry]) -> Result<Vec<ValidatedEntry>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let amount = parse_ton(&entry.amount).map_err(|e| annotate(e, index))?;
            let destination = entry
                .address
                .parse::<TonAddress>()
                .map_err(|e| annotate(e, index))?;
            Ok(ValidatedEntry {
                destination,
                amount,
            })
        })
        .collect()
}

fn annotate(error: Error, index: usize) -> Error {
    match error {
        Error::Amount(msg) => Error::Amount(format!("entry {}: {}", index, msg)),
        Error::Address(msg) => Error::Address(format!("entry {}: {}", index, msg)),
        other => other,
    }
}
