use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entity::Network;

/// A tracked token, keyed in the watchlist table by its uppercase symbol
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub symbol: String,
    pub network: Network,
    pub address: String,
}

impl WatchlistEntry {
    pub fn new(symbol: &str, network: Network, address: &str) -> Self {
        Self {
            symbol: symbol.trim().to_uppercase(),
            network,
            address: address.trim().to_string(),
        }
    }

    pub fn has_address(&self, address: &str) -> bool {
        self.address.eq_ignore_ascii_case(address.trim())
    }
}

/// Watchlist table, iterated in insertion order
pub type Watchlist = IndexMap<String, WatchlistEntry>;

/// Watchlist entry with the price fetched for display
#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistItem {
    pub entry: WatchlistEntry,
    pub price_usd: Option<f64>,
}

impl WatchlistItem {
    // Format price for display
    pub fn format_price(&self) -> String {
        match self.price_usd {
            Some(price) => crate::utils::format_price(price),
            None => "N/A".to_string(),
        }
    }
}
