//! Name-resolution contract.
//!
//! Wallet queries accept either a canonical address or an ENS-style name.
//! Mapping names to addresses is an external concern: the pipeline depends
//! only on the [`NameResolver`] trait, and a resolution failure aborts the
//! query before any page is fetched.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::HistoryError;
use crate::types::Address;

/// Maps a human-readable name to a canonical address.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Resolve `name`, or fail with [`HistoryError::Resolution`].
    async fn resolve(&self, name: &str) -> Result<Address, HistoryError>;
}

/// Returns `true` if `input` looks like an ENS name: a single label of
/// ASCII letters, digits, or hyphens, followed by `.eth`.
pub fn looks_like_ens_name(input: &str) -> bool {
    match input.strip_suffix(".eth") {
        Some(label) => {
            !label.is_empty() && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        }
        None => false,
    }
}

/// Fixed in-memory name table, for tests and caller-supplied aliases.
/// Names compare case-insensitively.
#[derive(Debug, Default)]
pub struct StaticResolver {
    entries: HashMap<String, Address>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name-to-address mapping.
    pub fn with(mut self, name: impl Into<String>, address: Address) -> Self {
        self.entries.insert(name.into().to_ascii_lowercase(), address);
        self
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl NameResolver for StaticResolver {
    async fn resolve(&self, name: &str) -> Result<Address, HistoryError> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| HistoryError::Resolution {
                name: name.to_string(),
                reason: "name not found".into(),
            })
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
