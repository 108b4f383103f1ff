//! Integration tests for the pagination drain and query orchestration.
//!
//! A scripted `HistorySource` stands in for the explorer API so the tests
//! can count page requests, inject failures, and inspect the progress
//! stream without any network access.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use walletgraph_core::error::HistoryError;
use walletgraph_core::progress::MemorySink;
use walletgraph_core::resolver::StaticResolver;
use walletgraph_core::types::Address;
use walletgraph_scan::api::RawTransaction;
use walletgraph_scan::fetcher::{HistoryFetcher, HistorySource};
use walletgraph_scan::query::{counterparty_summaries, interaction_graph};

// ─── Helpers ──────────────────────────────────────────────────────────────────

const WALLET_A: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const WALLET_B: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
const WALLET_C: &str = "0xcccccccccccccccccccccccccccccccccccccccc";

fn addr(s: &str) -> Address {
    Address::parse(s).expect("valid test address")
}

fn raw_tx(i: usize, from: &str, to: &str) -> RawTransaction {
    RawTransaction {
        block_number: (17_000_000 + i).to_string(),
        time_stamp: (1_700_000_000 + i).to_string(),
        hash: format!("0xhash{i}"),
        from: from.to_string(),
        to: to.to_string(),
        value: "1000000000000000000".to_string(),
        gas: "21000".to_string(),
        gas_price: "30000000000".to_string(),
        is_error: "0".to_string(),
    }
}

fn page_of(n: usize) -> Vec<RawTransaction> {
    (0..n).map(|i| raw_tx(i, WALLET_A, WALLET_B)).collect()
}

fn transport_error(page: u64) -> HistoryError {
    HistoryError::Transport {
        page,
        reason: "connection reset by peer".into(),
    }
}

/// Serves a fixed script of page results and records every request.
struct ScriptedSource {
    script: Mutex<VecDeque<Result<Vec<RawTransaction>, HistoryError>>>,
    requested_pages: Mutex<Vec<u64>>,
}

impl ScriptedSource {
    fn new(script: Vec<Result<Vec<RawTransaction>, HistoryError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requested_pages: Mutex::new(Vec::new()),
        }
    }

    fn requested(&self) -> Vec<u64> {
        self.requested_pages.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistorySource for &ScriptedSource {
    async fn fetch_page(
        &self,
        _address: &Address,
        page: u64,
        _page_size: usize,
    ) -> Result<Vec<RawTransaction>, HistoryError> {
        self.requested_pages.lock().unwrap().push(page);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("source queried past the end of its script")
    }
}

// ─── Termination ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn three_pages_then_short_page() {
    let source = ScriptedSource::new(vec![Ok(page_of(100)), Ok(page_of(100)), Ok(page_of(37))]);
    let fetcher = HistoryFetcher::new(&source);

    let records = fetcher.fetch_all(&addr(WALLET_A)).await.unwrap();

    assert_eq!(records.len(), 237);
    assert_eq!(source.requested(), vec![1, 2, 3]);
}

#[tokio::test]
async fn empty_first_page_stops_immediately() {
    let source = ScriptedSource::new(vec![Ok(Vec::new())]);
    let fetcher = HistoryFetcher::new(&source);

    let records = fetcher.fetch_all(&addr(WALLET_A)).await.unwrap();

    assert!(records.is_empty());
    assert_eq!(source.requested(), vec![1]);
}

#[tokio::test]
async fn short_page_after_full_page_completes() {
    // An API refusal surfaces as an empty page, indistinguishable from
    // exhaustion: the drain completes with only the earlier records.
    let source = ScriptedSource::new(vec![Ok(page_of(100)), Ok(Vec::new())]);
    let fetcher = HistoryFetcher::new(&source);

    let records = fetcher.fetch_all(&addr(WALLET_A)).await.unwrap();

    assert_eq!(records.len(), 100);
    assert_eq!(source.requested(), vec![1, 2]);
}

#[tokio::test]
async fn records_arrive_in_page_order() {
    let source = ScriptedSource::new(vec![Ok(page_of(100)), Ok(page_of(7))]);
    let fetcher = HistoryFetcher::new(&source);

    let records = fetcher.fetch_all(&addr(WALLET_A)).await.unwrap();

    let heights: Vec<u64> = records.iter().map(|r| r.block_height).collect();
    assert_eq!(heights[..3], [17_000_000, 17_000_001, 17_000_002]);
    assert_eq!(heights[100..103], [17_000_000, 17_000_001, 17_000_002]);
}

// ─── Failure policy ───────────────────────────────────────────────────────────

#[tokio::test]
async fn transport_failure_discards_partial_results() {
    let source = ScriptedSource::new(vec![Ok(page_of(100)), Err(transport_error(2))]);
    let fetcher = HistoryFetcher::new(&source);

    let err = fetcher.fetch_all(&addr(WALLET_A)).await.unwrap_err();

    assert!(matches!(err, HistoryError::Transport { page: 2, .. }));
    // No further page was requested after the failure.
    assert_eq!(source.requested(), vec![1, 2]);
}

#[tokio::test]
async fn failure_is_reported_to_the_sink() {
    let source = ScriptedSource::new(vec![Err(transport_error(1))]);
    let sink = Arc::new(MemorySink::new());
    let fetcher = HistoryFetcher::new(&source).with_sink(sink.clone());

    fetcher.fetch_all(&addr(WALLET_A)).await.unwrap_err();

    let messages = sink.messages();
    assert!(messages
        .iter()
        .any(|m| m.starts_with("Failed to fetch transactions:")));
    assert!(!messages.iter().any(|m| m.starts_with("Completed")));
}

// ─── Validation filtering ─────────────────────────────────────────────────────

#[tokio::test]
async fn skipped_records_do_not_end_pagination_early() {
    // Page 1 is full on the wire but one record fails validation (contract
    // creation with an empty recipient). The drain must still request page 2.
    let mut first = page_of(99);
    first.push(raw_tx(99, WALLET_A, ""));
    let source = ScriptedSource::new(vec![Ok(first), Ok(page_of(5))]);
    let fetcher = HistoryFetcher::new(&source);

    let records = fetcher.fetch_all(&addr(WALLET_A)).await.unwrap();

    assert_eq!(source.requested(), vec![1, 2]);
    assert_eq!(records.len(), 104); // 105 raw minus the skipped one
}

// ─── Progress stream ──────────────────────────────────────────────────────────

#[tokio::test]
async fn progress_stream_matches_expected_wording() {
    let source = ScriptedSource::new(vec![Ok(page_of(2)), Ok(page_of(1))]);
    let sink = Arc::new(MemorySink::new());
    let fetcher = HistoryFetcher::new(&source)
        .with_page_size(2)
        .with_sink(sink.clone());

    fetcher.fetch_all(&addr(WALLET_A)).await.unwrap();

    assert_eq!(
        sink.messages(),
        vec![
            format!("Starting to fetch all transactions for {WALLET_A}"),
            format!("Fetching transactions for {WALLET_A} (page 1)..."),
            "Fetched page 1, continuing...".to_string(),
            format!("Fetching transactions for {WALLET_A} (page 2)..."),
            "Completed fetching all transactions: 3 total".to_string(),
        ]
    );

    let events = sink.snapshot();
    for pair in events.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

// ─── Query orchestration ──────────────────────────────────────────────────────

#[tokio::test]
async fn resolution_failure_aborts_before_any_fetch() {
    let source = ScriptedSource::new(vec![]);
    let fetcher = HistoryFetcher::new(&source);
    let resolver = StaticResolver::new();

    let err = interaction_graph(&fetcher, "ghost.eth", Some(&resolver))
        .await
        .unwrap_err();

    assert!(matches!(err, HistoryError::Resolution { .. }));
    assert!(source.requested().is_empty());
}

#[tokio::test]
async fn resolved_name_builds_graph_for_target() {
    let source = ScriptedSource::new(vec![Ok(vec![
        raw_tx(0, WALLET_A, WALLET_B),
        raw_tx(1, WALLET_A, WALLET_B),
        raw_tx(2, WALLET_B, WALLET_A),
    ])]);
    let fetcher = HistoryFetcher::new(&source);
    let resolver = StaticResolver::new().with("alice.eth", addr(WALLET_A));

    let graph = interaction_graph(&fetcher, "alice.eth", Some(&resolver))
        .await
        .unwrap();

    assert_eq!(graph.central().unwrap().address, addr(WALLET_A));
    assert_eq!(graph.edge(&addr(WALLET_A), &addr(WALLET_B)).unwrap().weight, 2);
    assert_eq!(graph.edge(&addr(WALLET_B), &addr(WALLET_A)).unwrap().weight, 1);
    assert_eq!(graph.node(&addr(WALLET_A)).unwrap().interactions, 3);
}

#[tokio::test]
async fn graph_progress_messages_follow_fetch_messages() {
    let source = ScriptedSource::new(vec![Ok(page_of(1))]);
    let sink = Arc::new(MemorySink::new());
    let fetcher = HistoryFetcher::new(&source).with_sink(sink.clone());

    interaction_graph(&fetcher, WALLET_A, None).await.unwrap();

    let messages = sink.messages();
    let processing = messages
        .iter()
        .position(|m| m == "Processing transactions for graph visualization...")
        .expect("processing message missing");
    assert!(messages[..processing]
        .iter()
        .any(|m| m.starts_with("Completed fetching")));
    assert_eq!(messages[processing + 1], "Graph data prepared: 2 nodes, 1 links");
}

#[tokio::test]
async fn counterparty_summaries_sort_busiest_first() {
    let source = ScriptedSource::new(vec![Ok(vec![
        raw_tx(0, WALLET_A, WALLET_B),
        raw_tx(1, WALLET_B, WALLET_A),
        raw_tx(2, WALLET_A, WALLET_C),
        raw_tx(3, WALLET_A, WALLET_A), // self-transfer: excluded from summaries
    ])]);
    let fetcher = HistoryFetcher::new(&source);

    let (central, summaries) = counterparty_summaries(&fetcher, WALLET_A, None)
        .await
        .unwrap();

    assert_eq!(central, addr(WALLET_A));
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].address, addr(WALLET_B));
    assert_eq!(summaries[0].count(), 2);
    assert_eq!(summaries[1].address, addr(WALLET_C));
    assert_eq!(summaries[1].count(), 1);
}
