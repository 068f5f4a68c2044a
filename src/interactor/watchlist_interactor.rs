use crate::dexscreener::{PriceService, TokenRepository};
use crate::entity::{BotError, Network, Token, WatchlistEntry, WatchlistItem};
use crate::interactor::db::JsonDb;
use crate::utils::get_paginated_watchlist;
use async_trait::async_trait;
use futures::future::join_all;
use log::{error, info, warn};
use std::sync::Arc;

#[async_trait]
pub trait WatchlistInteractor: Send + Sync {
    async fn get_watchlist(&self) -> Result<Vec<WatchlistEntry>, BotError>;
    async fn add_to_watchlist(
        &self,
        network: Network,
        token_address: &str,
    ) -> Result<(WatchlistEntry, Token), BotError>;
    /// Removes the entry and every notification for its symbol; returns how many notifications went
    async fn remove_from_watchlist(&self, symbol: &str) -> Result<usize, BotError>;
    async fn get_watchlist_item(&self, symbol: &str) -> Result<Option<WatchlistItem>, BotError>;
    async fn get_watchlist_page(&self, page: usize) -> Result<Vec<WatchlistItem>, BotError>;
}

pub struct WatchlistInteractorImpl {
    db: Arc<JsonDb>,
    token_repository: Arc<dyn TokenRepository + Send + Sync>,
    price_service: Arc<dyn PriceService + Send + Sync>,
}

impl WatchlistInteractorImpl {
    pub fn new(
        db: Arc<JsonDb>,
        token_repository: Arc<dyn TokenRepository + Send + Sync>,
        price_service: Arc<dyn PriceService + Send + Sync>,
    ) -> Self {
        Self {
            db,
            token_repository,
            price_service,
        }
    }

    async fn price_item(&self, entry: WatchlistEntry) -> WatchlistItem {
        let price_usd = match self.price_service.get_token_price(&entry.address).await {
            Ok(price) => price,
            Err(e) => {
                warn!("Failed to get price for {}: {}", entry.symbol, e);
                None
            }
        };

        WatchlistItem { entry, price_usd }
    }
}

#[async_trait]
impl WatchlistInteractor for WatchlistInteractorImpl {
    async fn get_watchlist(&self) -> Result<Vec<WatchlistEntry>, BotError> {
        Ok(self.db.get_watchlist().await.into_values().collect())
    }

    async fn add_to_watchlist(
        &self,
        network: Network,
        token_address: &str,
    ) -> Result<(WatchlistEntry, Token), BotError> {
        let token_address = token_address.trim();
        if token_address.is_empty() {
            return Err(BotError::EmptyAddress);
        }

        let watchlist = self.db.get_watchlist().await;
        if watchlist.values().any(|entry| entry.has_address(token_address)) {
            info!(
                "Attempted to add a token already in the watchlist: {}",
                token_address
            );
            return Err(BotError::DuplicateToken);
        }

        let token = self
            .token_repository
            .resolve_token(token_address, network)
            .await?
            .ok_or_else(|| {
                error!(
                    "Token not found for network: {}, contract address: {}",
                    network, token_address
                );
                BotError::TokenNotFound
            })?;

        let entry = WatchlistEntry::new(&token.symbol, network, token_address);

        // the resolver call is slow, so check again under the lock
        let stored = entry.clone();
        self.db
            .update_watchlist(move |watchlist| {
                if watchlist.values().any(|e| e.has_address(&stored.address)) {
                    return Err(BotError::DuplicateToken);
                }
                // the table and the notifications are keyed by symbol, one address per symbol
                if let Some(existing) = watchlist.get(&stored.symbol) {
                    warn!(
                        "Symbol {} already tracks {}; refusing {}",
                        existing.symbol, existing.address, stored.address
                    );
                    return Err(BotError::DuplicateSymbol(existing.symbol.clone()));
                }
                watchlist.insert(stored.symbol.clone(), stored);
                Ok(())
            })
            .await?;

        info!(
            "Token added to watchlist: {} ({})",
            token.name, entry.symbol
        );

        Ok((entry, token))
    }

    async fn remove_from_watchlist(&self, symbol: &str) -> Result<usize, BotError> {
        let symbol = symbol.trim().to_uppercase();

        let removed = self
            .db
            .update_tables(|watchlist, notifications| {
                if watchlist.shift_remove(&symbol).is_none() {
                    return Err(BotError::SymbolNotInWatchlist(symbol.clone()));
                }

                let before = notifications.len();
                notifications.retain(|_, notification| notification.symbol != symbol);
                Ok(before - notifications.len())
            })
            .await?;

        info!(
            "Removed {} from watchlist and {} notifications",
            symbol, removed
        );

        Ok(removed)
    }

    async fn get_watchlist_item(&self, symbol: &str) -> Result<Option<WatchlistItem>, BotError> {
        let symbol = symbol.trim().to_uppercase();

        match self.db.get_watchlist().await.shift_remove(&symbol) {
            Some(entry) => Ok(Some(self.price_item(entry).await)),
            None => Ok(None),
        }
    }

    async fn get_watchlist_page(&self, page: usize) -> Result<Vec<WatchlistItem>, BotError> {
        let entries = self.get_watchlist().await?;
        let page_entries = get_paginated_watchlist(&entries, page).to_vec();

        Ok(join_all(page_entries.into_iter().map(|entry| self.price_item(entry))).await)
    }
}
