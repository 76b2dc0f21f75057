//! Chain client capability and the wallet daemon implementation
//!
//! The pipeline talks to the network exclusively through [`ChainClient`]:
//! a balance snapshot and an atomic submit-and-wait for one batch of
//! transfers. The shipped implementation, [`WalletRpcClient`], speaks
//! JSON-RPC 2.0 to a wallet daemon that owns the highload wallet key and
//! handles signing, wire serialization and proof checks. Key material never
//! enters this process.

use crate::address::TonAddress;
use crate::error::{Error, Result};
use crate::rpc::{BatchStatus, RpcRequest, RpcResponse, TransferParam};
use async_trait::async_trait;
use rand::random;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// Pay message fees from the sender's balance instead of the transfer value
pub const PAY_FEES_SEPARATELY: u8 = 0x01;

/// Keep processing the remaining messages if one action fails on-chain
pub const IGNORE_ACTION_ERRORS: u8 = 0x02;

/// Default send mode for payout transfers
///
/// Fees are paid separately per recipient and a single bad recipient does
/// not roll back the rest of the batch.
pub const DEFAULT_SEND_MODE: u8 = PAY_FEES_SEPARATELY | IGNORE_ACTION_ERRORS;

/// One outgoing transfer within a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub destination: TonAddress,
    /// Amount in nanotons
    pub amount: u64,
    pub mode: u8,
    pub bounce: bool,
    pub comment: Option<String>,
}

/// Minimum chain access required by the dispatch pipeline
///
/// `submit_transfer_batch` is atomic from the caller's point of view: it
/// returns only once the transaction carrying every transfer in the batch
/// has been confirmed, or fails the whole batch.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Current account balance in nanotons
    async fn current_balance(&self, account: &TonAddress) -> Result<u64>;

    /// Submit one batch as a single multi-transfer transaction from
    /// `source` and block until it is confirmed, returning the transaction
    /// hash
    async fn submit_transfer_batch(
        &self,
        source: &TonAddress,
        transfers: &[Transfer],
    ) -> Result<String>;
}

/// JSON-RPC client for a TON wallet daemon
///
/// The daemon exposes `getbalance`, `sendbatch` and `getbatchstatus`;
/// `sendbatch` queues a signed multi-transfer transaction and returns a
/// batch id that is then polled until the network confirms it.
pub struct WalletRpcClient {
    endpoint: String,
    http: reqwest::Client,
    auth: Option<String>,
    poll_interval: Duration,
    confirm_timeout: Duration,
}

impl WalletRpcClient {
    /// Create a new client without authentication.
    pub fn new(endpoint: impl Into<String>) -> Self {
        WalletRpcClient {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
            auth: None,
            poll_interval: Duration::from_secs(2),
            confirm_timeout: Duration::from_secs(300),
        }
    }

    /// Create a new client with HTTP basic authentication.
    pub fn with_auth(endpoint: impl Into<String>, username: String, password: String) -> Self {
        use base64::Engine;
        let mut client = Self::new(endpoint);
        let credentials = format!("{}:{}", username, password);
        client.auth = Some(base64::engine::general_purpose::STANDARD.encode(credentials));
        client
    }

    /// Override the confirmation polling cadence and timeout.
    pub fn with_confirmation_timing(mut self, poll_interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.confirm_timeout = timeout;
        self
    }

    /// Call a JSON-RPC method and deserialize the result into the requested
    /// type.
    async fn call<T, P>(&self, method: &str, params: P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let params = serde_json::to_value(params)?;
        let request = RpcRequest {
            jsonrpc: "2.0".to_string(),
            id: random::<u64>(),
            method: method.to_string(),
            params,
        };

        let mut req = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .header("Content-Type", "application/json");

        if let Some(ref auth) = self.auth {
            req = req.header("Authorization", format!("Basic {}", auth));
        }

        let response = req.send().await?;

        if !response.status().is_success() {
            return Err(Error::Rpc(format!(
                "RPC request failed with status: {}",
                response.status()
            )));
        }

        let rpc_response: RpcResponse<T> = response.json().await?;

        if let Some(error) = rpc_response.error {
            return Err(Error::Rpc(format!(
                "RPC error {}: {}",
                error.code, error.message
            )));
        }

        rpc_response
            .result
            .ok_or_else(|| Error::Rpc("RPC response missing result".to_string()))
    }

    /// Get an account's balance as decimal-string nanotons.
    pub async fn get_balance(&self, account: &TonAddress) -> Result<u64> {
        let balance: String = self
            .call("getbalance", serde_json::json!([account.to_string()]))
            .await?;
        balance
            .parse()
            .map_err(|_| Error::Rpc(format!("daemon returned malformed balance {:?}", balance)))
    }

    /// Queue a multi-transfer transaction, returning the daemon's batch id.
    pub async fn send_batch(&self, source: &TonAddress, transfers: &[Transfer]) -> Result<String> {
        let params: Vec<TransferParam> = transfers
            .iter()
            .map(|t| TransferParam {
                destination: t.destination.to_string(),
                amount: t.amount.to_string(),
                mode: t.mode,
                bounce: t.bounce,
                comment: t.comment.clone(),
            })
            .collect();
        self.call(
            "sendbatch",
            serde_json::json!([source.to_string(), params]),
        )
        .await
    }

    /// Fetch the current status of a queued batch.
    pub async fn get_batch_status(&self, batch_id: &str) -> Result<BatchStatus> {
        self.call("getbatchstatus", serde_json::json!([batch_id]))
            .await
    }

    /// Poll a queued batch until the network confirms it.
    ///
    /// Returns the transaction hash on confirmation. A daemon-reported
    /// failure or the overall timeout fails the batch.
    pub async fn wait_for_confirmation(&self, batch_id: &str) -> Result<String> {
        let start = std::time::Instant::now();

        loop {
            if start.elapsed() > self.confirm_timeout {
                return Err(Error::Rpc(format!(
                    "batch {} not confirmed after {} seconds",
                    batch_id,
                    self.confirm_timeout.as_secs()
                )));
            }

            let status = self.get_batch_status(batch_id).await?;
            match status.status.as_str() {
                "confirmed" => {
                    return status.tx_hash.ok_or_else(|| {
                        Error::Rpc(format!(
                            "batch {} confirmed without a transaction hash",
                            batch_id
                        ))
                    });
                }
                "failed" => {
                    let reason = status.error.unwrap_or_else(|| "unknown error".to_string());
                    return Err(Error::Rpc(format!("batch {} failed: {}", batch_id, reason)));
                }
                other => {
                    tracing::debug!(batch_id, status = other, "awaiting confirmation");
                }
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl ChainClient for WalletRpcClient {
    async fn current_balance(&self, account: &TonAddress) -> Result<u64> {
        self.get_balance(account).await
    }

    async fn submit_transfer_batch(
        &self,
        source: &TonAddress,
        transfers: &[Transfer],
    ) -> Result<String> {
        let batch_id = self.send_batch(source, transfers).await?;
        tracing::debug!(batch_id = %batch_id, transfers = transfers.len(), "batch queued");
        self.wait_for_confirmation(&batch_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_send_mode_combines_both_flags() {
        assert_eq!(DEFAULT_SEND_MODE, 0x03);
        assert_ne!(DEFAULT_SEND_MODE & PAY_FEES_SEPARATELY, 0);
        assert_ne!(DEFAULT_SEND_MODE & IGNORE_ACTION_ERRORS, 0);
    }
}
