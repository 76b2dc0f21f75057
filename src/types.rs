//! Common types and data structures for the TON Payout SDK

use serde::{Deserialize, Serialize};

/// Network type (Mainnet or Testnet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Explorer lookup URL for a transaction hash
    pub fn explorer_tx_url(&self, tx_hash: &str) -> String {
        match self {
            Network::Mainnet => format!("https://tonscan.org/tx/{}", tx_hash),
            Network::Testnet => format!("https://testnet.tonscan.org/tx/{}", tx_hash),
        }
    }
}

/// Transaction status as reported by the chain client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Rejected,
}

/// Outcome of one confirmed batch
///
/// Produced by the dispatcher after the chain client reports inclusion.
/// Used for operator logging only; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionOutcome {
    pub batch_index: usize,
    pub tx_hash: String,
    pub status: TransactionStatus,
}

/// Utility functions for TON amounts
///
/// Amounts are carried as `u64` nanotons everywhere. Decimal strings are
/// parsed with exact fixed-point arithmetic so that summing a payout list
/// never suffers floating-point drift.
pub mod utils {
    use crate::error::{Error, Result};

    /// Nanotons per TON (1 TON = 10^9 nanotons)
    pub const NANOTONS_PER_TON: u64 = 1_000_000_000;

    /// Number of decimal places in the TON native unit
    pub const TON_DECIMALS: usize = 9;

    /// Parse a decimal TON string into nanotons
    ///
    /// Accepts a non-negative decimal with at most 9 fractional digits
    /// ("1", "0.05", "12.000000001", ".5"). Anything else is an
    /// [`Error::Amount`].
    pub fn parse_ton(value: &str) -> Result<u64> {
        let trimmed = value.trim();
        let (int_part, frac_part) = match trimmed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (trimmed, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(Error::Amount(format!("empty amount string {:?}", value)));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(Error::Amount(format!("malformed amount {:?}", value)));
        }
        if frac_part.len() > TON_DECIMALS {
            return Err(Error::Amount(format!(
                "amount {:?} has more than {} decimal places",
                value, TON_DECIMALS
            )));
        }

        let whole: u64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| Error::Amount(format!("amount {:?} out of range", value)))?
        };
        let frac: u64 = if frac_part.is_empty() {
            0
        } else {
            // Right-pad to 9 digits: "05" -> 050_000_000
            let padded = format!("{:0<width$}", frac_part, width = TON_DECIMALS);
            padded
                .parse()
                .map_err(|_| Error::Amount(format!("malformed amount {:?}", value)))?
        };

        whole
            .checked_mul(NANOTONS_PER_TON)
            .and_then(|nano| nano.checked_add(frac))
            .ok_or_else(|| Error::Amount(format!("amount {:?} out of range", value)))
    }

    /// Format nanotons as a decimal TON string
    ///
    /// Trailing fractional zeros are trimmed: 50_000_000 -> "0.05".
    pub fn format_ton(nanotons: u64) -> String {
        let whole = nanotons / NANOTONS_PER_TON;
        let frac = nanotons % NANOTONS_PER_TON;
        if frac == 0 {
            format!("{}", whole)
        } else {
            let frac = format!("{:09}", frac);
            format!("{}.{}", whole, frac.trim_end_matches('0'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use crate::error::Error;

    #[test]
    fn parse_ton_whole_and_fractional() {
        assert_eq!(parse_ton("1").unwrap(), 1_000_000_000);
        assert_eq!(parse_ton("0.05").unwrap(), 50_000_000);
        assert_eq!(parse_ton("12.000000001").unwrap(), 12_000_000_001);
        assert_eq!(parse_ton(".5").unwrap(), 500_000_000);
        assert_eq!(parse_ton("3.").unwrap(), 3_000_000_000);
        assert_eq!(parse_ton("0").unwrap(), 0);
    }

    #[test]
    fn parse_ton_rejects_malformed() {
        assert!(matches!(parse_ton("abc"), Err(Error::Amount(_))));
        assert!(matches!(parse_ton(""), Err(Error::Amount(_))));
        assert!(matches!(parse_ton("-1"), Err(Error::Amount(_))));
        assert!(matches!(parse_ton("1.2.3"), Err(Error::Amount(_))));
        assert!(matches!(parse_ton("1,5"), Err(Error::Amount(_))));
    }

    #[test]
    fn parse_ton_rejects_excess_precision() {
        assert!(matches!(parse_ton("0.0000000001"), Err(Error::Amount(_))));
    }

    #[test]
    fn parse_ton_rejects_overflow() {
        // u64::MAX nanotons is ~18.4 billion TON
        assert!(matches!(
            parse_ton("99999999999999999999"),
            Err(Error::Amount(_))
        ));
    }

    #[test]
    fn format_ton_trims_trailing_zeros() {
        assert_eq!(format_ton(50_000_000), "0.05");
        assert_eq!(format_ton(1_000_000_000), "1");
        assert_eq!(format_ton(12_000_000_001), "12.000000001");
        assert_eq!(format_ton(0), "0");
    }

    #[test]
    fn explorer_url_depends_on_network() {
        use super::Network;
        assert_eq!(
            Network::Mainnet.explorer_tx_url("abc"),
            "https://tonscan.org/tx/abc"
        );
        assert_eq!(
            Network::Testnet.explorer_tx_url("abc"),
            "https://testnet.tonscan.org/tx/abc"
        );
    }
}
