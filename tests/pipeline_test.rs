//! End-to-end pipeline tests with a scripted in-process chain client

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use ton_payout_sdk::address::TonAddress;
use ton_payout_sdk::client::{ChainClient, Transfer};
use ton_payout_sdk::dispatch::{split, Disburser, RunConfig};
use ton_payout_sdk::entries::{validate_entries, PaymentEntry};
use ton_payout_sdk::error::Error;
use ton_payout_sdk::Result;

/// Everything the pipeline asked the chain for, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Balance,
    /// Number of transfers in the submitted batch
    Submit(usize),
}

struct ScriptedClient {
    balance: u64,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedClient {
    fn new(balance: u64) -> Self {
        ScriptedClient {
            balance,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for ScriptedClient {
    async fn current_balance(&self, _account: &TonAddress) -> Result<u64> {
        self.calls.lock().unwrap().push(Call::Balance);
        Ok(self.balance)
    }

    async fn submit_transfer_batch(
        &self,
        _source: &TonAddress,
        transfers: &[Transfer],
    ) -> Result<String> {
        let mut calls = self.calls.lock().unwrap();
        let submitted = calls
            .iter()
            .filter(|c| matches!(c, Call::Submit(_)))
            .count();
        calls.push(Call::Submit(transfers.len()));
        Ok(format!("tx-{}", submitted))
    }
}

fn addr(seed: u8) -> TonAddress {
    TonAddress::new(0, [seed; 32], true, false)
}

fn entry(amount: &str, seed: u8) -> PaymentEntry {
    PaymentEntry {
        amount: amount.to_string(),
        address: addr(seed).to_string(),
    }
}

fn quick_config() -> RunConfig {
    RunConfig {
        pace: Duration::ZERO,
        ..RunConfig::default()
    }
}

fn disburser(client: ScriptedClient) -> Disburser<ScriptedClient> {
    Disburser::with_config(client, addr(0xee), quick_config())
}

#[tokio::test]
async fn five_entries_disburse_as_four_then_one() {
    let entries = vec![
        entry("1", 1),
        entry("2", 2),
        entry("3", 3),
        entry("4", 4),
        entry("5", 5),
    ];
    let client = ScriptedClient::new(100_000_000_000);
    let disburser = disburser(client);

    let outcomes = disburser.run(&entries).await.unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].tx_hash, "tx-0");
    assert_eq!(outcomes[1].tx_hash, "tx-1");
    assert_eq!(
        outcomes.iter().map(|o| o.batch_index).collect::<Vec<_>>(),
        vec![0, 1]
    );
}

#[tokio::test]
async fn confirmation_precedes_next_submission() {
    // The call log is strictly ordered: the balance snapshot comes first and
    // every submission (which only returns once confirmed) is recorded
    // before the next begins.
    let entries: Vec<_> = (0..9).map(|i| entry("0.1", i + 1)).collect();
    let client = ScriptedClient::new(100_000_000_000);
    let disburser = disburser(client);

    disburser.run(&entries).await.unwrap();

    let calls = disburser_calls(&disburser);
    assert_eq!(
        calls,
        vec![
            Call::Balance,
            Call::Submit(4),
            Call::Submit(4),
            Call::Submit(1)
        ]
    );
}

#[tokio::test]
async fn insufficient_funds_blocks_all_submissions() {
    // 80 nanotons of payouts + 5 * 4 reserve -> required 100
    let entries = vec![
        entry("0.00000001", 1),
        entry("0.00000002", 2),
        entry("0.00000003", 3),
        entry("0.00000002", 4),
    ];
    let config = RunConfig {
        reserve_per_transfer: 5,
        ..quick_config()
    };
    let client = ScriptedClient::new(99);
    let disburser = Disburser::with_config(client, addr(0xee), config);

    let err = disburser.run(&entries).await.unwrap_err();
    match err {
        Error::InsufficientFunds {
            required,
            available,
            shortfall,
        } => {
            assert_eq!(required, 100);
            assert_eq!(available, 99);
            assert_eq!(shortfall, 1);
        }
        other => panic!("expected InsufficientFunds, got {:?}", other),
    }
    assert_eq!(disburser_calls(&disburser), vec![Call::Balance]);
}

#[tokio::test]
async fn exact_balance_passes_the_funding_gate() {
    let entries = vec![
        entry("0.00000001", 1),
        entry("0.00000002", 2),
        entry("0.00000003", 3),
        entry("0.00000002", 4),
    ];
    let config = RunConfig {
        reserve_per_transfer: 5,
        ..quick_config()
    };
    let client = ScriptedClient::new(100);
    let disburser = Disburser::with_config(client, addr(0xee), config);

    let outcomes = disburser.run(&entries).await.unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(
        disburser_calls(&disburser),
        vec![Call::Balance, Call::Submit(4)]
    );
}

#[tokio::test]
async fn empty_entry_list_completes_without_submissions() {
    let client = ScriptedClient::new(0);
    let disburser = disburser(client);

    let outcomes = disburser.run(&[]).await.unwrap();
    assert!(outcomes.is_empty());
    assert_eq!(disburser_calls(&disburser), vec![Call::Balance]);
}

#[tokio::test]
async fn malformed_amount_aborts_before_any_chain_access() {
    let entries = vec![entry("1", 1), entry("2", 2), entry("abc", 3), entry("4", 4)];
    let client = ScriptedClient::new(100_000_000_000);
    let disburser = disburser(client);

    let err = disburser.run(&entries).await.unwrap_err();
    assert!(matches!(err, Error::Amount(_)));
    assert!(disburser_calls(&disburser).is_empty());
}

#[test]
fn split_lengths_sum_and_concatenation_match_input() {
    let entries: Vec<_> = (0..11).map(|i| entry("1", i + 1)).collect();
    let validated = validate_entries(&entries).unwrap();

    for batch_size in 1..=12 {
        let batches = split(&validated, batch_size).unwrap();
        let total: usize = batches.iter().map(|b| b.len()).sum();
        assert_eq!(total, validated.len());
        assert_eq!(batches.concat(), validated);
        for batch in &batches[..batches.len() - 1] {
            assert_eq!(batch.len(), batch_size);
        }
        assert!(batches.last().unwrap().len() <= batch_size);
    }
}

#[test]
fn split_is_idempotent() {
    let entries: Vec<_> = (0..7).map(|i| entry("0.5", i + 1)).collect();
    let validated = validate_entries(&entries).unwrap();
    let first = split(&validated, 3).unwrap();
    let second = split(&validated, 3).unwrap();
    assert_eq!(first, second);
}

fn disburser_calls(disburser: &Disburser<ScriptedClient>) -> Vec<Call> {
    disburser.client().calls()
}
