//! Explorer provider profiles.
//!
//! Every Etherscan-family explorer speaks the same `txlist` dialect behind a
//! different host, so a profile is just an endpoint URL plus a name the CLI
//! can select it by.

use crate::client::HttpScanClient;

pub const BASESCAN_URL: &str = "https://api.basescan.org/api";
pub const ETHERSCAN_URL: &str = "https://api.etherscan.io/api";
pub const POLYGONSCAN_URL: &str = "https://api.polygonscan.com/api";
pub const ARBISCAN_URL: &str = "https://api.arbiscan.io/api";
pub const OPTIMISM_ETHERSCAN_URL: &str = "https://api-optimistic.etherscan.io/api";

/// Supported profiles as `(name, endpoint)` pairs, in display order.
pub const SUPPORTED: &[(&str, &str)] = &[
    ("base", BASESCAN_URL),
    ("ethereum", ETHERSCAN_URL),
    ("polygon", POLYGONSCAN_URL),
    ("arbitrum", ARBISCAN_URL),
    ("optimism", OPTIMISM_ETHERSCAN_URL),
];

/// Look up a profile endpoint by CLI name.
pub fn by_name(name: &str) -> Option<&'static str> {
    SUPPORTED
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, url)| *url)
}

/// Map a chain id to its explorer endpoint (defaults to Basescan).
pub fn chain_id_to_url(chain_id: u64) -> &'static str {
    match chain_id {
        1 => ETHERSCAN_URL,
        10 => OPTIMISM_ETHERSCAN_URL,
        137 => POLYGONSCAN_URL,
        8453 => BASESCAN_URL,
        42161 => ARBISCAN_URL,
        _ => BASESCAN_URL,
    }
}

/// Build a client for the Base explorer.
pub fn basescan(api_key: &str) -> HttpScanClient {
    HttpScanClient::default_for(BASESCAN_URL, api_key)
}

/// Build a client for the Ethereum mainnet explorer.
pub fn etherscan(api_key: &str) -> HttpScanClient {
    HttpScanClient::default_for(ETHERSCAN_URL, api_key)
}

/// Build a client for the Polygon explorer.
pub fn polygonscan(api_key: &str) -> HttpScanClient {
    HttpScanClient::default_for(POLYGONSCAN_URL, api_key)
}

/// Build a client for the Arbitrum One explorer.
pub fn arbiscan(api_key: &str) -> HttpScanClient {
    HttpScanClient::default_for(ARBISCAN_URL, api_key)
}

/// Build a client for the OP Mainnet explorer.
pub fn optimistic_etherscan(api_key: &str) -> HttpScanClient {
    HttpScanClient::default_for(OPTIMISM_ETHERSCAN_URL, api_key)
}

/// Build a client for the explorer serving `chain_id`.
pub fn for_chain(chain_id: u64, api_key: &str) -> HttpScanClient {
    HttpScanClient::default_for(chain_id_to_url(chain_id), api_key)
}
