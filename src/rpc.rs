//! JSON-RPC wire types for the wallet daemon

use serde::{Deserialize, Serialize};

/// RPC request structure
#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: serde_json::Value,
}

/// RPC response structure
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub(crate) struct RpcResponse<T> {
    pub jsonrpc: String,
    pub id: u64,
    pub result: Option<T>,
    pub error: Option<RpcError>,
}

/// RPC error structure
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub(crate) struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// One transfer as submitted to the daemon's `sendbatch` method
///
/// Amounts travel as decimal-string nanotons, matching the daemon's balance
/// representation, so values never pass through JSON floating point.
#[derive(Debug, Clone, Serialize)]
pub struct TransferParam {
    pub destination: String,
    pub amount: String,
    pub mode: u8,
    pub bounce: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Status of a queued batch, from `getbatchstatus`
#[derive(Debug, Clone, Deserialize)]
pub struct BatchStatus {
    /// "pending", "confirmed" or "failed"
    pub status: String,
    /// Set once the transaction is confirmed
    pub tx_hash: Option<String>,
    /// Set when the daemon rejects or loses the batch
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_param_omits_absent_comment() {
        let param = TransferParam {
            destination: "EQtest".to_string(),
            amount: "50000000".to_string(),
            mode: 3,
            bounce: true,
            comment: None,
        };
        let json = serde_json::to_value(&param).unwrap();
        assert!(json.get("comment").is_none());
        assert_eq!(json["amount"], "50000000");
        assert_eq!(json["mode"], 3);
    }

    #[test]
    fn batch_status_deserializes_partial_fields() {
        let status: BatchStatus =
            serde_json::from_str(r#"{"status": "pending", "tx_hash": null, "error": null}"#)
                .unwrap();
        assert_eq!(status.status, "pending");
        assert!(status.tx_hash.is_none());
    }
}
