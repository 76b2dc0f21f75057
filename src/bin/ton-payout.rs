//! ton-payout - Batch payout CLI for TON accounts
//!
//! Loads a JSON payout list, verifies the sending account can cover it, then
//! disburses it in fixed-size batches through a wallet daemon, waiting for
//! each batch to confirm before sending the next.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::time::Duration;
use ton_payout_sdk::address::TonAddress;
use ton_payout_sdk::client::WalletRpcClient;
use ton_payout_sdk::dispatch::{Disburser, RunConfig, DEFAULT_BATCH_SIZE};
use ton_payout_sdk::entries::{load_entries, validate_entries};
use ton_payout_sdk::funding::{check_funding, required_balance};
use ton_payout_sdk::types::{utils, Network};

#[derive(Parser)]
#[command(name = "ton-payout")]
#[command(about = "Batch TON payout disburser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Network to use (mainnet, testnet)
    #[arg(short, long, default_value = "mainnet")]
    network: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a payout run
    Run {
        /// Path to the JSON entry file
        #[arg(short, long)]
        entries: String,
        /// Wallet daemon RPC endpoint URL
        #[arg(long)]
        rpc_url: String,
        /// RPC username
        #[arg(long)]
        rpc_user: Option<String>,
        /// RPC password
        #[arg(long)]
        rpc_password: Option<String>,
        /// Source account address
        #[arg(short, long)]
        from: String,
        /// Transfers per batch
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
        /// Delay between batches in seconds
        #[arg(long, default_value_t = 30)]
        pace_secs: u64,
        /// Fee reserve per transfer in TON
        #[arg(long, default_value = "0.05")]
        reserve: String,
        /// Comment attached to every transfer
        #[arg(long)]
        comment: Option<String>,
    },
    /// Validate an entry file and check funding without sending anything
    Check {
        /// Path to the JSON entry file
        #[arg(short, long)]
        entries: String,
        /// Wallet daemon RPC endpoint URL
        #[arg(long)]
        rpc_url: String,
        /// RPC username
        #[arg(long)]
        rpc_user: Option<String>,
        /// RPC password
        #[arg(long)]
        rpc_password: Option<String>,
        /// Source account address
        #[arg(short, long)]
        from: String,
        /// Fee reserve per transfer in TON
        #[arg(long, default_value = "0.05")]
        reserve: String,
    },
    /// Print an account's balance
    Balance {
        /// Wallet daemon RPC endpoint URL
        #[arg(long)]
        rpc_url: String,
        /// RPC username
        #[arg(long)]
        rpc_user: Option<String>,
        /// RPC password
        #[arg(long)]
        rpc_password: Option<String>,
        /// Account address
        #[arg(short, long)]
        address: String,
    },
}

fn parse_network(network_str: &str) -> Network {
    match network_str.to_lowercase().as_str() {
        "testnet" => Network::Testnet,
        _ => Network::Mainnet,
    }
}

fn build_client(
    rpc_url: &str,
    rpc_user: &Option<String>,
    rpc_password: &Option<String>,
) -> WalletRpcClient {
    match (rpc_user, rpc_password) {
        (Some(user), Some(password)) => {
            WalletRpcClient::with_auth(rpc_url, user.clone(), password.clone())
        }
        _ => WalletRpcClient::new(rpc_url),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    } else {
        tracing_subscriber::fmt().with_env_filter("info").init();
    }

    let network = parse_network(&cli.network);

    match cli.command {
        Commands::Run {
            entries,
            rpc_url,
            rpc_user,
            rpc_password,
            from,
            batch_size,
            pace_secs,
            reserve,
            comment,
        } => {
            let list = load_entries(&entries)
                .with_context(|| format!("failed to load entries from {}", entries))?;
            let source: TonAddress = from
                .parse()
                .with_context(|| format!("invalid source address {}", from))?;
            let reserve_per_transfer =
                utils::parse_ton(&reserve).context("invalid reserve amount")?;

            let config = RunConfig {
                batch_size,
                pace: Duration::from_secs(pace_secs),
                reserve_per_transfer,
                network,
                comment,
            };
            let client = build_client(&rpc_url, &rpc_user, &rpc_password);
            let disburser = Disburser::with_config(client, source, config);

            let outcomes = disburser.run(&list).await?;
            println!("Disbursed {} entries in {} batches:", list.len(), outcomes.len());
            for outcome in &outcomes {
                println!(
                    "  batch {}: {} ({})",
                    outcome.batch_index,
                    outcome.tx_hash,
                    network.explorer_tx_url(&outcome.tx_hash)
                );
            }
        }
        Commands::Check {
            entries,
            rpc_url,
            rpc_user,
            rpc_password,
            from,
            reserve,
        } => {
            let list = load_entries(&entries)
                .with_context(|| format!("failed to load entries from {}", entries))?;
            let validated = validate_entries(&list)?;
            let source: TonAddress = from
                .parse()
                .with_context(|| format!("invalid source address {}", from))?;
            let reserve_per_transfer =
                utils::parse_ton(&reserve).context("invalid reserve amount")?;

            let client = build_client(&rpc_url, &rpc_user, &rpc_password);
            let balance = client.get_balance(&source).await?;
            let required = required_balance(&validated, reserve_per_transfer)?;
            check_funding(&validated, balance, reserve_per_transfer)?;

            println!("{} entries valid", validated.len());
            println!("Required: {} TON (incl. reserve)", utils::format_ton(required));
            println!("Available: {} TON", utils::format_ton(balance));
            println!("Funding check passed");
        }
        Commands::Balance {
            rpc_url,
            rpc_user,
            rpc_password,
            address,
        } => {
            let account: TonAddress = address
                .parse()
                .with_context(|| format!("invalid address {}", address))?;
            let client = build_client(&rpc_url, &rpc_user, &rpc_password);
            let balance = client.get_balance(&account).await?;
            println!("{} TON", utils::format_ton(balance));
        }
    }

    Ok(())
}
