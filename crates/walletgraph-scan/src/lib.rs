//! walletgraph-scan: Etherscan-family history source for WalletGraph.
//!
//! Speaks the `module=account&action=txlist` dialect shared by Basescan,
//! Etherscan, Polygonscan, and friends, and drives the pagination drain
//! from `walletgraph-core`:
//!
//! ```text
//! HttpScanClient ──(HistorySource)──▶ HistoryFetcher ──▶ Vec<TransactionRecord>
//!        │                                 │
//!    providers::*                     PaginationState + ProgressSink
//! ```

pub mod api;
pub mod client;
pub mod fetcher;
pub mod providers;
pub mod query;

pub use api::{RawTransaction, TxListEnvelope};
pub use client::{HttpScanClient, ScanClientConfig};
pub use fetcher::{HistoryFetcher, HistorySource, DEFAULT_PAGE_SIZE};
pub use query::{counterparty_summaries, interaction_graph, resolve_target};
