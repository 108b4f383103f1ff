//! Interaction-graph aggregation.
//!
//! Consumes a complete transaction list once and produces the weighted,
//! directed node/edge graph for the queried wallet.

use std::collections::{HashMap, HashSet};

use crate::types::{Address, GraphEdge, GraphNode, TransactionRecord, WalletGraph};

// ─── GraphAggregator ─────────────────────────────────────────────────────────

/// Single-pass aggregator from transactions to a weighted interaction graph.
///
/// The queried (central) address is seeded into the node set up front, so it
/// is present even when no transaction mentions it. Edge weights count
/// transactions per directed `(from, to)` pair; a node's interaction total
/// sums the weights of every edge touching it on either side, which makes a
/// self-edge count twice toward its own node.
///
/// Aggregation is commutative: any permutation of the same input produces
/// the same graph. Records are never deduplicated by hash.
#[derive(Debug)]
pub struct GraphAggregator {
    central: Address,
    addresses: HashSet<Address>,
    edge_weights: HashMap<(Address, Address), u64>,
}

impl GraphAggregator {
    /// Create an aggregator for the given central address.
    pub fn new(central: Address) -> Self {
        let mut addresses = HashSet::new();
        addresses.insert(central.clone());
        Self {
            central,
            addresses,
            edge_weights: HashMap::new(),
        }
    }

    /// Fold one transaction into the graph.
    pub fn observe(&mut self, record: &TransactionRecord) {
        self.addresses.insert(record.from.clone());
        self.addresses.insert(record.to.clone());
        *self
            .edge_weights
            .entry((record.from.clone(), record.to.clone()))
            .or_insert(0) += 1;
    }

    /// Finish the pass and emit the graph.
    ///
    /// Nodes sort by address and links by (source, target) so serialized
    /// output is reproducible.
    pub fn finish(self) -> WalletGraph {
        let mut interactions: HashMap<Address, u64> = HashMap::new();
        for ((source, target), weight) in &self.edge_weights {
            *interactions.entry(source.clone()).or_insert(0) += weight;
            *interactions.entry(target.clone()).or_insert(0) += weight;
        }

        let mut nodes: Vec<GraphNode> = self
            .addresses
            .iter()
            .map(|address| GraphNode {
                id: address.as_str().to_string(),
                address: address.clone(),
                is_central: *address == self.central,
                interactions: interactions.get(address).copied().unwrap_or(0),
            })
            .collect();
        nodes.sort_by(|a, b| a.address.cmp(&b.address));

        let mut links: Vec<GraphEdge> = self
            .edge_weights
            .into_iter()
            .map(|((source, target), weight)| GraphEdge {
                source,
                target,
                weight,
            })
            .collect();
        links.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

        WalletGraph { nodes, links }
    }
}

/// Build the interaction graph for `central` from a complete record list.
pub fn build_interaction_graph(records: &[TransactionRecord], central: Address) -> WalletGraph {
    let mut aggregator = GraphAggregator::new(central);
    for record in records {
        aggregator.observe(record);
    }
    aggregator.finish()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
