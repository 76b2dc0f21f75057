use thiserror::Error;

/// Error types for the TON Payout SDK
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Entry list format error: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Amount parse error: {0}")]
    Amount(String),

    #[error("Address parse error: {0}")]
    Address(String),

    #[error("Insufficient funds: required {required} nanotons, available {available} (short {shortfall})")]
    InsufficientFunds {
        required: u64,
        available: u64,
        shortfall: u64,
    },

    #[error("Batch {batch} submission failed: {reason}")]
    Submit { batch: usize, reason: String },

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, Error>;
