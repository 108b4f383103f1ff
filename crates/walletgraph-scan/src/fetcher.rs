//! Transaction-history fetcher: drains every page for one wallet.
//!
//! Pages are requested strictly one at a time because the next page number
//! depends on the size of the previous page. The drain succeeds only as a
//! whole; any page failure discards everything fetched so far.

use std::sync::Arc;

use async_trait::async_trait;

use walletgraph_core::error::HistoryError;
use walletgraph_core::pagination::PaginationState;
use walletgraph_core::progress::{NullSink, ProgressEvent, ProgressSink};
use walletgraph_core::types::{Address, TransactionRecord};

use crate::api::{convert_records, RawTransaction};

/// Records per page requested from the ledger API.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// One page of wallet history from a ledger API.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Fetch page `page` (1-based) with at most `page_size` records.
    async fn fetch_page(
        &self,
        address: &Address,
        page: u64,
        page_size: usize,
    ) -> Result<Vec<RawTransaction>, HistoryError>;
}

/// Drains a wallet's complete history from a [`HistorySource`].
pub struct HistoryFetcher<S> {
    source: S,
    page_size: usize,
    sink: Arc<dyn ProgressSink>,
}

impl<S: HistorySource> HistoryFetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            page_size: DEFAULT_PAGE_SIZE,
            sink: Arc::new(NullSink),
        }
    }

    /// Override the page size (clamped to at least 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Publish progress events to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch the wallet's complete history.
    ///
    /// Returns every record the API reported, in arrival order, validated
    /// and ready for aggregation. Any page failure aborts the whole
    /// operation; nothing partial is ever returned.
    pub async fn fetch_all(
        &self,
        address: &Address,
    ) -> Result<Vec<TransactionRecord>, HistoryError> {
        self.publish(format!("Starting to fetch all transactions for {address}"));
        tracing::info!(wallet = %address, page_size = self.page_size, "Starting history drain");

        let mut state = PaginationState::begin();
        while let Some(page) = state.next_page() {
            self.publish(format!(
                "Fetching transactions for {address} (page {page})..."
            ));

            state = match self.source.fetch_page(address, page, self.page_size).await {
                Ok(records) => {
                    let next = state.on_page(records, self.page_size);
                    if next.next_page().is_some() {
                        self.publish(format!("Fetched page {page}, continuing..."));
                    }
                    next
                }
                Err(error) => {
                    tracing::error!(wallet = %address, page, error = %error, "History drain failed");
                    state.on_error(error)
                }
            };
        }

        match state.into_result() {
            Ok(raw) => {
                let total = raw.len();
                self.publish(format!(
                    "Completed fetching all transactions: {total} total"
                ));
                tracing::info!(wallet = %address, total, "History drain complete");
                Ok(convert_records(raw))
            }
            Err(error) => {
                self.publish(format!("Failed to fetch transactions: {error}"));
                Err(error)
            }
        }
    }

    pub(crate) fn publish(&self, message: impl Into<String>) {
        self.sink.publish(ProgressEvent::now(message));
    }
}
