//! HTTP client for Etherscan-family explorer APIs, backed by `reqwest`.
//!
//! One GET request per history page, no retries: every failure surfaces
//! once and aborts the drain that issued it.

use std::time::Duration;

use async_trait::async_trait;

use walletgraph_core::error::HistoryError;
use walletgraph_core::types::Address;

use crate::api::{RawTransaction, TxListEnvelope};
use crate::fetcher::HistorySource;

/// Configuration for `HttpScanClient`.
#[derive(Debug, Clone)]
pub struct ScanClientConfig {
    pub request_timeout: Duration,
}

impl Default for ScanClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// History source speaking the `module=account&action=txlist` dialect.
pub struct HttpScanClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl HttpScanClient {
    /// Create a client for the given explorer endpoint.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        config: ScanClientConfig,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            http,
        }
    }

    /// Create with default configuration.
    pub fn default_for(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::new(base_url, api_key, ScanClientConfig::default())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl HistorySource for HttpScanClient {
    async fn fetch_page(
        &self,
        address: &Address,
        page: u64,
        page_size: usize,
    ) -> Result<Vec<RawTransaction>, HistoryError> {
        let page_param = page.to_string();
        let offset_param = page_size.to_string();
        let params = [
            ("module", "account"),
            ("action", "txlist"),
            ("address", address.as_str()),
            ("startblock", "0"),
            ("endblock", "99999999"),
            ("page", page_param.as_str()),
            ("offset", offset_param.as_str()),
            ("sort", "asc"),
            ("apikey", self.api_key.as_str()),
        ];

        let response = self
            .http
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| HistoryError::Transport {
                page,
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(HistoryError::Transport {
                page,
                reason: format!("HTTP {status}: {body}"),
            });
        }

        let envelope =
            response
                .json::<TxListEnvelope>()
                .await
                .map_err(|e| HistoryError::Decode {
                    page,
                    reason: e.to_string(),
                })?;

        let records = envelope.into_raw(page)?;
        tracing::debug!(page, count = records.len(), "Fetched transaction page");
        Ok(records)
    }
}
