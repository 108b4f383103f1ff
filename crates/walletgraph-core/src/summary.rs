//! Per-counterparty activity summaries.
//!
//! A flat transaction history is hard to scan; grouping it by counterparty
//! (the non-central endpoint of each transaction) gives the per-wallet view
//! the graph's edges summarize.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{Address, TransactionRecord};

/// Direction of a transaction relative to the queried wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    /// Classify `record` relative to `central`.
    pub fn of(record: &TransactionRecord, central: &Address) -> Self {
        if record.from == *central {
            Self::Sent
        } else {
            Self::Received
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sent => write!(f, "sent"),
            Self::Received => write!(f, "received"),
        }
    }
}

/// All activity between the queried wallet and one counterparty.
#[derive(Debug, Clone, Serialize)]
pub struct CounterpartySummary {
    /// The non-central endpoint.
    pub address: Address,
    /// Transactions between the two wallets, in arrival order.
    pub transactions: Vec<TransactionRecord>,
}

impl CounterpartySummary {
    /// Number of transactions with this counterparty.
    pub fn count(&self) -> usize {
        self.transactions.len()
    }
}

/// Group `records` by counterparty relative to `central`.
///
/// Self-transfers (`from == to == central`) have no counterparty and are
/// skipped; they still appear in the interaction graph as self-edges.
/// Output sorts by transaction count descending, ties broken by address,
/// so the busiest counterparties come first.
pub fn summarize_counterparties(
    records: &[TransactionRecord],
    central: &Address,
) -> Vec<CounterpartySummary> {
    let mut groups: HashMap<Address, Vec<TransactionRecord>> = HashMap::new();
    for record in records {
        let counterparty = if record.from == *central {
            &record.to
        } else {
            &record.from
        };
        if counterparty == central {
            continue;
        }
        groups
            .entry(counterparty.clone())
            .or_default()
            .push(record.clone());
    }

    let mut summaries: Vec<CounterpartySummary> = groups
        .into_iter()
        .map(|(address, transactions)| CounterpartySummary {
            address,
            transactions,
        })
        .collect();
    summaries.sort_by(|a, b| {
        b.count()
            .cmp(&a.count())
            .then_with(|| a.address.cmp(&b.address))
    });
    summaries
}

// ─── Tests ────────────────────────────────────────────────────────────────────
