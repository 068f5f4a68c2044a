use crate::dexscreener::client::DexScreenerClient;
use crate::dexscreener::models::find_pair;
use crate::entity::BotError;
use async_trait::async_trait;
use log::warn;
use std::sync::Arc;

/// USD price lookup by contract address
#[async_trait]
pub trait PriceService: Send + Sync {
    /// `Ok(None)` when no price is listed for the address
    async fn get_token_price(&self, address: &str) -> Result<Option<f64>, BotError>;
}

pub struct DexScreenerPriceService {
    client: Arc<DexScreenerClient>,
}

impl DexScreenerPriceService {
    pub fn new(client: Arc<DexScreenerClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PriceService for DexScreenerPriceService {
    async fn get_token_price(&self, address: &str) -> Result<Option<f64>, BotError> {
        let pairs = self.client.get_pairs(address).await?;

        let price = find_pair(&pairs, address).and_then(|pair| pair.price());
        if price.is_none() {
            warn!("No price information found for token {}", address);
        }

        Ok(price)
    }
}
