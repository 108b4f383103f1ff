//! Shared types for the wallet-history pipeline.

use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

// ─── Address ─────────────────────────────────────────────────────────────────

/// A wallet address, normalized to lowercase at construction.
///
/// Two spellings of the same address (`0xAbC…` / `0xabc…`) parse to equal
/// keys, so map lookups and edge keys never split on case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Parse an address: `0x` followed by exactly 40 hex digits.
    pub fn parse(input: &str) -> Result<Self, HistoryError> {
        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"));
        match hex {
            Some(h) if h.len() == 40 && h.bytes().all(|b| b.is_ascii_hexdigit()) => {
                Ok(Self(format!("0x{}", h.to_ascii_lowercase())))
            }
            _ => Err(HistoryError::InvalidAddress(trimmed.to_string())),
        }
    }

    /// The normalized (lowercase) string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated `0x1234...abcd` form for labels and tables.
    pub fn short(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Address::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ─── TransactionRecord ───────────────────────────────────────────────────────

/// A single confirmed transaction, as reported by the ledger API.
///
/// Built once per query by the scan layer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Block height the transaction was included at (ordering key).
    pub block_height: u64,
    /// Unix timestamp of the containing block (seconds since epoch).
    pub timestamp: i64,
    /// Transaction hash. Unique upstream, but never used for deduplication
    /// here: a hash appearing twice in the input counts twice.
    pub hash: String,
    /// Sender address.
    pub from: Address,
    /// Recipient address.
    pub to: Address,
    /// Transferred amount in wei, as a decimal string (may be `"0"`).
    pub value: String,
    /// Gas limit, as reported by the API.
    pub gas: String,
    /// Gas price in wei, as reported by the API.
    pub gas_price: String,
    /// `true` if the transaction reverted on-chain.
    pub is_error: bool,
}

// ─── Graph output ────────────────────────────────────────────────────────────

/// One node of the interaction graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Node id; mirrors the address string (force-graph consumers key on it).
    pub id: String,
    /// The wallet this node represents.
    pub address: Address,
    /// `true` only for the queried wallet.
    pub is_central: bool,
    /// Sum of the weights of every edge touching this node on either side.
    pub interactions: u64,
}

/// One directed edge of the interaction graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    /// Sender side of the observed transactions.
    pub source: Address,
    /// Recipient side of the observed transactions.
    pub target: Address,
    /// Number of transactions observed from `source` to `target`.
    /// Serialized as `value`, the name the visualization consumes.
    #[serde(rename = "value")]
    pub weight: u64,
}

/// The complete interaction graph for one queried wallet.
///
/// Nodes and links are sorted for reproducible serialization, but the order
/// is incidental: consumers must not attach meaning to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphEdge>,
}

impl WalletGraph {
    /// Look up a node by address.
    pub fn node(&self, address: &Address) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.address == *address)
    }

    /// Look up a directed edge by its (source, target) pair.
    pub fn edge(&self, source: &Address, target: &Address) -> Option<&GraphEdge> {
        self.links
            .iter()
            .find(|e| e.source == *source && e.target == *target)
    }

    /// The node flagged as central.
    pub fn central(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.is_central)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
