//! # TON Payout SDK
//!
//! A batch payment disburser for TON accounts.
//!
//! Given a list of (address, amount) pairs, the SDK verifies the sending
//! account holds sufficient funds (including a per-message fee reserve),
//! partitions the list into fixed-size batches, submits one multi-transfer
//! transaction per batch through a chain-client capability, and blocks until
//! each batch is confirmed before dispatching the next.
//!
//! ## Features
//!
//! - **Entry loading**: read and strictly validate JSON payout lists, with
//!   exact fixed-point amount parsing (no floating point near money)
//! - **Funding pre-check**: one balance snapshot up front must cover every
//!   payout plus a fixed per-transfer fee reserve
//! - **Sequential dispatch**: at most one unconfirmed transaction
//!   outstanding, with a fixed pacing delay between batches
//! - **Pluggable chain access**: the [`client::ChainClient`] trait keeps the
//!   pipeline testable without network access; the shipped
//!   [`client::WalletRpcClient`] talks JSON-RPC to a key-owning wallet daemon
//!
//! ## Example
//!
//! ```no_run
//! use ton_payout_sdk::client::WalletRpcClient;
//! use ton_payout_sdk::dispatch::Disburser;
//! use ton_payout_sdk::entries::load_entries;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let entries = load_entries("payouts.json")?;
//!
//! let client = WalletRpcClient::new("http://localhost:8081");
//! let source = "UQAtKNTJW5r1eT1em1hdf7eTeGqr2u__X_CeGYjfMeCTbPTP".parse()?;
//!
//! let outcomes = Disburser::new(client, source).run(&entries).await?;
//! for outcome in outcomes {
//!     println!("batch {} -> {}", outcome.batch_index, outcome.tx_hash);
//! }
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod client;
pub mod dispatch;
pub mod entries;
pub mod error;
pub mod funding;
pub mod rpc;
pub mod types;

pub use error::{Error, Result};

/// Re-export commonly used types
pub use types::*;

/// Re-export utility functions
pub use types::utils;

/// Re-export funding check functions
pub use funding::{check_funding, required_balance, total_amount, DEFAULT_RESERVE_PER_TRANSFER};
