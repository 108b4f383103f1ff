//! Pagination state for draining a paged history API.
//!
//! The ledger API never reports a total count. The only exhaustion signal is
//! a page that comes back with strictly fewer records than were requested,
//! so the drain must proceed one page at a time.
//!
//! The machine is generic over the record type: the exhaustion rule has to
//! count records exactly as the API returned them, before any validation
//! filtering shrinks a page.

use crate::error::HistoryError;

/// First page number the ledger API accepts.
pub const FIRST_PAGE: u64 = 1;

/// Explicit state of one pagination drain.
///
/// Transitions, driven by the fetch loop:
/// - `Fetching` to `Fetching` when a page comes back full (more may follow)
/// - `Fetching` to `Done` when a page comes back short (sole exhaustion signal)
/// - `Fetching` to `Failed` when a page request fails
#[derive(Debug)]
pub enum PaginationState<T> {
    /// Mid-drain; `page` is the next page to request.
    Fetching { page: u64, accumulated: Vec<T> },
    /// Every page drained; `accumulated` holds all records in arrival order.
    Done { accumulated: Vec<T> },
    /// A page request failed. Records fetched before the failure are
    /// discarded: partial history must never escape the drain.
    Failed { error: HistoryError },
}

impl<T> PaginationState<T> {
    /// Start a drain at the first page with an empty accumulator.
    pub fn begin() -> Self {
        Self::Fetching {
            page: FIRST_PAGE,
            accumulated: Vec::new(),
        }
    }

    /// Absorb one fetched page.
    ///
    /// A full page (`records.len() >= page_size`) advances to the next page
    /// number; a short page ends the drain. Terminal states are returned
    /// unchanged.
    pub fn on_page(self, records: Vec<T>, page_size: usize) -> Self {
        match self {
            Self::Fetching {
                page,
                mut accumulated,
            } => {
                let full = records.len() >= page_size;
                accumulated.extend(records);
                if full {
                    Self::Fetching {
                        page: page + 1,
                        accumulated,
                    }
                } else {
                    Self::Done { accumulated }
                }
            }
            terminal => terminal,
        }
    }

    /// Record a failed page request. Terminal states are returned unchanged.
    pub fn on_error(self, error: HistoryError) -> Self {
        match self {
            Self::Fetching { .. } => Self::Failed { error },
            terminal => terminal,
        }
    }

    /// The next page to request, or `None` once the drain is terminal.
    pub fn next_page(&self) -> Option<u64> {
        match self {
            Self::Fetching { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Number of records accumulated so far (zero after a failure).
    pub fn total_fetched(&self) -> usize {
        match self {
            Self::Fetching { accumulated, .. } | Self::Done { accumulated } => accumulated.len(),
            Self::Failed { .. } => 0,
        }
    }

    /// Consume the drain into its outcome.
    ///
    /// Callers normally invoke this only after [`next_page`](Self::next_page)
    /// returns `None`; an in-progress drain yields the records accumulated
    /// so far.
    pub fn into_result(self) -> Result<Vec<T>, HistoryError> {
        match self {
            Self::Fetching { accumulated, .. } | Self::Done { accumulated } => Ok(accumulated),
            Self::Failed { error } => Err(error),
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
