//! Batch payout example against a local wallet daemon
use std::time::Duration;
use ton_payout_sdk::client::WalletRpcClient;
use ton_payout_sdk::dispatch::{Disburser, RunConfig};
use ton_payout_sdk::entries::PaymentEntry;
use ton_payout_sdk::types::Network;
use ton_payout_sdk::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let client = WalletRpcClient::with_auth(
        "http://localhost:8081",
        "rpcuser".to_string(),
        "rpcpassword".to_string(),
    );
    let source = "…replace with the daemon's wallet address…".parse()?;

    let payouts = vec![
        PaymentEntry {
            amount: "1.5".to_string(),
            address: "…replace…".to_string(),
        },
        PaymentEntry {
            amount: "0.25".to_string(),
            address: "…replace…".to_string(),
        },
    ];

    let config = RunConfig {
        pace: Duration::from_secs(30),
        network: Network::Mainnet,
        comment: Some("payout".to_string()),
        ..RunConfig::default()
    };

    let outcomes = Disburser::with_config(client, source, config)
        .run(&payouts)
        .await?;
    for outcome in outcomes {
        println!(
            "batch {} confirmed: {}",
            outcome.batch_index,
            Network::Mainnet.explorer_tx_url(&outcome.tx_hash)
        );
    }

    Ok(())
}
