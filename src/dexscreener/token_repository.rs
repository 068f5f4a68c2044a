use crate::dexscreener::client::DexScreenerClient;
use crate::dexscreener::models::find_pair;
use crate::entity::{BotError, Network, Token};
use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;

/// Resolves contract addresses into token identities
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// `Ok(None)` when the service lists no pair for the address
    async fn resolve_token(&self, address: &str, network: Network)
        -> Result<Option<Token>, BotError>;
}

pub struct DexScreenerTokenRepository {
    client: Arc<DexScreenerClient>,
}

impl DexScreenerTokenRepository {
    pub fn new(client: Arc<DexScreenerClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TokenRepository for DexScreenerTokenRepository {
    async fn resolve_token(
        &self,
        address: &str,
        network: Network,
    ) -> Result<Option<Token>, BotError> {
        info!("Resolving {} token {}", network, address);

        let pairs = self.client.get_pairs(address).await?;

        match find_pair(&pairs, address) {
            Some(pair) => Ok(Some(Token {
                chain_id: pair.chain_id.clone(),
                symbol: pair.base_token.symbol.clone(),
                name: pair.base_token.name.clone(),
            })),
            None => {
                error!("No matching token details found for {}", address);
                Ok(None)
            }
        }
    }
}
