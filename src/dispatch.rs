//! The sequential payout pipeline
//!
//! A run moves through fixed stages: validate every entry, snapshot the
//! account balance, verify funding, split the list into batches, then
//! dispatch the batches strictly one after another. Batch i+1 is not built
//! until batch i's confirmation has been observed, so at most one
//! unconfirmed transaction is ever outstanding and any failure belongs
//! unambiguously to the current batch.
//!
//! There is no retry and no resumption: the first error aborts the run, and
//! already-confirmed batches stay final on-chain. The error reports which
//! stage (and for submissions, which batch index) failed so the operator can
//! trim the already-paid prefix before re-running.

use crate::address::TonAddress;
use crate::client::{ChainClient, Transfer, DEFAULT_SEND_MODE};
use crate::entries::{validate_entries, PaymentEntry, ValidatedEntry};
use crate::error::{Error, Result};
use crate::funding::{check_funding, DEFAULT_RESERVE_PER_TRANSFER};
use crate::types::utils::format_ton;
use crate::types::{Network, TransactionOutcome, TransactionStatus};
use std::time::Duration;
use tracing::info;

/// Default number of transfers per batch
pub const DEFAULT_BATCH_SIZE: usize = 4;

/// Default inter-batch delay
pub const DEFAULT_PACE: Duration = Duration::from_secs(30);

/// Run-wide configuration, threaded explicitly through the pipeline
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub batch_size: usize,
    /// Fixed delay between a confirmed batch and the next dispatch
    pub pace: Duration,
    /// Fee headroom reserved per transfer in nanotons
    pub reserve_per_transfer: u64,
    pub network: Network,
    /// Optional comment attached to every transfer
    pub comment: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            pace: DEFAULT_PACE,
            reserve_per_transfer: DEFAULT_RESERVE_PER_TRANSFER,
            network: Network::default(),
            comment: None,
        }
    }
}

/// Split validated entries into ordered, contiguous batches
///
/// Pure and deterministic: input order is preserved, nothing is dropped or
/// duplicated, and only the final batch may be shorter than `batch_size`.
pub fn split(entries: &[ValidatedEntry], batch_size: usize) -> Result<Vec<&[ValidatedEntry]>> {
    if batch_size == 0 {
        return Err(Error::InvalidParameter(
            "batch size must be positive".to_string(),
        ));
    }
    Ok(entries.chunks(batch_size).collect())
}

/// Drives a full payout run against a [`ChainClient`]
pub struct Disburser<C> {
    client: C,
    source: TonAddress,
    config: RunConfig,
}

impl<C: ChainClient> Disburser<C> {
    /// Create a disburser with default configuration
    pub fn new(client: C, source: TonAddress) -> Self {
        Self::with_config(client, source, RunConfig::default())
    }

    pub fn with_config(client: C, source: TonAddress, config: RunConfig) -> Self {
        Disburser {
            client,
            source,
            config,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Access the underlying chain client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Execute the payout run
    ///
    /// Validates everything up front, checks funding against a single
    /// balance snapshot, then submits one multi-transfer transaction per
    /// batch, waiting for confirmation before moving on. Returns one
    /// [`TransactionOutcome`] per confirmed batch.
    pub async fn run(&self, entries: &[PaymentEntry]) -> Result<Vec<TransactionOutcome>> {
        let validated = validate_entries(entries)?;

        let balance = self.client.current_balance(&self.source).await?;
        check_funding(&validated, balance, self.config.reserve_per_transfer)?;

        let batches = split(&validated, self.config.batch_size)?;
        info!(
            entries = validated.len(),
            batches = batches.len(),
            balance = %format_ton(balance),
            "starting payout run"
        );

        let mut outcomes = Vec::with_capacity(batches.len());
        for (index, batch) in batches.iter().enumerate() {
            let transfers = self.build_transfers(batch);

            let tx_hash = self
                .client
                .submit_transfer_batch(&self.source, &transfers)
                .await
                .map_err(|e| Error::Submit {
                    batch: index,
                    reason: e.to_string(),
                })?;

            info!(
                batch = index,
                transfers = transfers.len(),
                tx_hash = %tx_hash,
                explorer = %self.config.network.explorer_tx_url(&tx_hash),
                "batch confirmed"
            );
            outcomes.push(TransactionOutcome {
                batch_index: index,
                tx_hash,
                status: TransactionStatus::Confirmed,
            });

            // Throttle before the next dispatch; nothing follows the last batch
            if index + 1 < batches.len() {
                info!(
                    delay_secs = self.config.pace.as_secs(),
                    "pacing before next batch"
                );
                tokio::time::sleep(self.config.pace).await;
            }
        }

        info!(batches = outcomes.len(), "payout run complete");
        Ok(outcomes)
    }

    fn build_transfers(&self, batch: &[ValidatedEntry]) -> Vec<Transfer> {
        batch
            .iter()
            .map(|entry| Transfer {
                destination: entry.destination.clone(),
                amount: entry.amount,
                mode: DEFAULT_SEND_MODE,
                bounce: entry.destination.is_bounceable(),
                comment: self.config.comment.clone(),
            })
            .collect()
    }
}
