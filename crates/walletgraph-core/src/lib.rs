//! walletgraph-core: types and algorithms for wallet interaction graphs.
//!
//! # Architecture
//!
//! ```text
//! wallet identifier ── NameResolver (names → Address, external)
//!        │
//! HistoryFetcher ───── PaginationState (Fetching → Done | Failed)
//!   (walletgraph-scan)      │
//!        │                  └── ProgressSink (injected observability)
//!        ▼
//! GraphAggregator ──── WalletGraph { nodes, links }
//!        └── summarize_counterparties (per-wallet activity view)
//! ```
//!
//! Everything in this crate is pure and I/O-free apart from the sink
//! implementations; the HTTP side lives in `walletgraph-scan`.

pub mod error;
pub mod graph;
pub mod pagination;
pub mod progress;
pub mod resolver;
pub mod summary;
pub mod types;

pub use error::HistoryError;
pub use graph::{build_interaction_graph, GraphAggregator};
pub use pagination::{PaginationState, FIRST_PAGE};
pub use progress::{MemorySink, NullSink, ProgressEvent, ProgressSink, TracingSink};
pub use resolver::{looks_like_ens_name, NameResolver, StaticResolver};
pub use summary::{summarize_counterparties, CounterpartySummary, Direction};
pub use types::{Address, GraphEdge, GraphNode, TransactionRecord, WalletGraph};
