use crate::dexscreener::models::{Pair, TokensResponse};
use crate::entity::BotError;
use log::{debug, error};
use reqwest::Client;
use std::time::Duration;

/// Thin HTTP client over the DEX Screener token endpoint
pub struct DexScreenerClient {
    http_client: Client,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BotError> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// All pairs the service lists for `address`
    pub async fn get_pairs(&self, address: &str) -> Result<Vec<Pair>, BotError> {
        let url = format!("{}/{}", self.base_url, address.trim());

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            error!("Failed to fetch pairs for {}: {}", address, e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BotError::Lookup(format!("{}: {}", status, error_text)));
        }

        let body: TokensResponse = response.json().await?;
        let pairs = body.pairs.unwrap_or_default();
        debug!("DEX Screener returned {} pairs for {}", pairs.len(), address);

        Ok(pairs)
    }
}
