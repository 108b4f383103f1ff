//! Error types for the wallet-history pipeline.

use thiserror::Error;

/// Errors that can occur while resolving a wallet identifier or draining
/// its transaction history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("invalid address '{0}': expected 0x followed by 40 hex characters")]
    InvalidAddress(String),

    #[error("could not resolve '{name}': {reason}")]
    Resolution { name: String, reason: String },

    #[error("transport error on page {page}: {reason}")]
    Transport { page: u64, reason: String },

    #[error("malformed response on page {page}: {reason}")]
    Decode { page: u64, reason: String },
}

impl HistoryError {
    /// Returns `true` if the failure happened before any page was requested.
    pub fn is_pre_fetch(&self) -> bool {
        matches!(self, Self::InvalidAddress(_) | Self::Resolution { .. })
    }
}
