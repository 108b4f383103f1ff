//! Wire format for the Etherscan-family `txlist` endpoint.

use serde::Deserialize;
use serde_json::Value;

use walletgraph_core::error::HistoryError;
use walletgraph_core::types::{Address, TransactionRecord};

/// Status value the API uses for a successful response.
pub const STATUS_OK: &str = "1";

/// Message accompanying the API's canonical empty result set. This arrives
/// with a non-ok status, through the same channel as real refusals.
pub const NO_TRANSACTIONS_FOUND: &str = "No transactions found";

// ─── Envelope ────────────────────────────────────────────────────────────────

/// Response envelope shared by every Etherscan-family endpoint.
///
/// `result` stays a raw JSON value: with `status == "1"` it is the record
/// array, but on other statuses the API may put a plain string there
/// (e.g. `"Invalid API Key"`).
#[derive(Debug, Deserialize)]
pub struct TxListEnvelope {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: Value,
}

impl TxListEnvelope {
    /// Extract the page's raw records, applying the response-status policy.
    ///
    /// A non-ok status yields an empty page. The drain then treats it as
    /// exhaustion, exactly like a genuinely empty wallet: the API reports
    /// "No transactions found" through this same channel, so the two cases
    /// cannot be told apart here. Every other refusal message is logged at
    /// warn because it may be truncating a longer history.
    pub fn into_raw(self, page: u64) -> Result<Vec<RawTransaction>, HistoryError> {
        if self.status != STATUS_OK {
            if self.message == NO_TRANSACTIONS_FOUND {
                tracing::debug!(page, "No transactions found");
            } else {
                tracing::warn!(
                    page,
                    status = %self.status,
                    message = %self.message,
                    "API refused the page; treating it as end of data"
                );
            }
            return Ok(Vec::new());
        }

        serde_json::from_value(self.result).map_err(|e| HistoryError::Decode {
            page,
            reason: e.to_string(),
        })
    }
}

// ─── RawTransaction ──────────────────────────────────────────────────────────

/// One transaction as returned by `txlist`. Every field arrives as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub gas: String,
    #[serde(default)]
    pub gas_price: String,
    #[serde(default)]
    pub is_error: String,
}

impl RawTransaction {
    /// Convert to the validated core record.
    ///
    /// Fails when an endpoint is not a valid address (contract creations
    /// leave `to` empty) or a numeric field does not parse.
    pub fn into_record(self) -> Result<TransactionRecord, String> {
        let from = Address::parse(&self.from)
            .map_err(|_| format!("bad from address '{}'", self.from))?;
        let to = Address::parse(&self.to).map_err(|_| format!("bad to address '{}'", self.to))?;
        let block_height = self
            .block_number
            .parse::<u64>()
            .map_err(|_| format!("bad blockNumber '{}'", self.block_number))?;
        let timestamp = self
            .time_stamp
            .parse::<i64>()
            .map_err(|_| format!("bad timeStamp '{}'", self.time_stamp))?;

        Ok(TransactionRecord {
            block_height,
            timestamp,
            hash: self.hash,
            from,
            to,
            value: if self.value.is_empty() {
                "0".into()
            } else {
                self.value
            },
            gas: self.gas,
            gas_price: self.gas_price,
            is_error: self.is_error == "1",
        })
    }
}

/// Convert a drained raw history into validated records.
///
/// Records that fail validation are skipped with a warning instead of
/// aborting the query; they must never reach the aggregator. This runs
/// after the drain so skipping cannot distort the short-page exhaustion
/// rule.
pub fn convert_records(raw: Vec<RawTransaction>) -> Vec<TransactionRecord> {
    let total = raw.len();
    let mut records = Vec::with_capacity(total);
    let mut skipped = 0usize;

    for tx in raw {
        match tx.into_record() {
            Ok(record) => records.push(record),
            Err(reason) => {
                skipped += 1;
                tracing::debug!(%reason, "Skipping malformed record");
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, total, "Skipped records that failed validation");
    }
    records
}

// ─── Tests ────────────────────────────────────────────────────────────────────
