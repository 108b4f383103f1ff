//! Wallet-query orchestration: resolve, drain, aggregate.

use walletgraph_core::error::HistoryError;
use walletgraph_core::graph::build_interaction_graph;
use walletgraph_core::resolver::{looks_like_ens_name, NameResolver};
use walletgraph_core::summary::{summarize_counterparties, CounterpartySummary};
use walletgraph_core::types::{Address, WalletGraph};

use crate::fetcher::{HistoryFetcher, HistorySource};

/// Turn caller input into a canonical address.
///
/// Canonical addresses pass through without touching the resolver. ENS-style
/// names consult it, and a resolution failure aborts the query before any
/// page is fetched. Everything else is rejected as an invalid address.
pub async fn resolve_target(
    input: &str,
    resolver: Option<&dyn NameResolver>,
) -> Result<Address, HistoryError> {
    let trimmed = input.trim();
    if looks_like_ens_name(trimmed) {
        return match resolver {
            Some(resolver) => resolver.resolve(trimmed).await,
            None => Err(HistoryError::Resolution {
                name: trimmed.to_string(),
                reason: "no resolver configured".into(),
            }),
        };
    }
    Address::parse(trimmed)
}

/// Fetch a wallet's history and build its interaction graph.
pub async fn interaction_graph<S: HistorySource>(
    fetcher: &HistoryFetcher<S>,
    input: &str,
    resolver: Option<&dyn NameResolver>,
) -> Result<WalletGraph, HistoryError> {
    let central = resolve_target(input, resolver).await?;
    let records = fetcher.fetch_all(&central).await?;

    fetcher.publish("Processing transactions for graph visualization...");
    let graph = build_interaction_graph(&records, central);
    fetcher.publish(format!(
        "Graph data prepared: {} nodes, {} links",
        graph.nodes.len(),
        graph.links.len()
    ));
    tracing::info!(
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        "Interaction graph built"
    );
    Ok(graph)
}

/// Fetch a wallet's history and summarize it per counterparty.
///
/// Returns the resolved central address alongside the summaries so callers
/// can label transaction directions.
pub async fn counterparty_summaries<S: HistorySource>(
    fetcher: &HistoryFetcher<S>,
    input: &str,
    resolver: Option<&dyn NameResolver>,
) -> Result<(Address, Vec<CounterpartySummary>), HistoryError> {
    let central = resolve_target(input, resolver).await?;
    let records = fetcher.fetch_all(&central).await?;
    let summaries = summarize_counterparties(&records, &central);
    Ok((central, summaries))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
