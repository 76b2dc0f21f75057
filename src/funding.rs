//! Pre-flight funding checks
//!
//! Before anything is submitted, the run verifies that the sending account
//! covers every payout plus a fixed per-transfer reserve. The reserve absorbs
//! fee variance: the balance is sampled once at the start of the run and is
//! not re-queried between batches, so each outgoing message must leave
//! headroom for its own network fees.
//!
//! All arithmetic is checked `u64` nanotons.

use crate::entries::ValidatedEntry;
use crate::error::{Error, Result};

/// Default fee reserve per transfer: 0.05 TON
pub const DEFAULT_RESERVE_PER_TRANSFER: u64 = 50_000_000;

/// Sum of all payout amounts in nanotons
pub fn total_amount(entries: &[ValidatedEntry]) -> Result<u64> {
    entries.iter().try_fold(0u64, |sum, entry| {
        sum.checked_add(entry.amount)
            .ok_or_else(|| Error::Amount("total payout amount exceeds u64 range".to_string()))
    })
}

/// Balance required to disburse `entries`: payouts plus per-transfer reserve
pub fn required_balance(entries: &[ValidatedEntry], reserve_per_transfer: u64) -> Result<u64> {
    let total = total_amount(entries)?;
    let reserve = reserve_per_transfer
        .checked_mul(entries.len() as u64)
        .ok_or_else(|| Error::Amount("fee reserve exceeds u64 range".to_string()))?;
    total
        .checked_add(reserve)
        .ok_or_else(|| Error::Amount("required balance exceeds u64 range".to_string()))
}

/// Verify the account balance covers the whole run
///
/// Equality passes: a balance exactly equal to the required amount is
/// sufficient. On failure the error carries the shortfall so the operator
/// knows how much to top up.
pub fn check_funding(
    entries: &[ValidatedEntry],
    balance: u64,
    reserve_per_transfer: u64,
) -> Result<()> {
    let required = required_balance(entries, reserve_per_transfer)?;
    if balance < required {
        return Err(Error::InsufficientFunds {
            required,
            available: balance,
            shortfall: required - balance,
        });
    }
    Ok(())
}
