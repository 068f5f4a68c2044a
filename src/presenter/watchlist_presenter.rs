use crate::entity::{BotError, Network, State};
use crate::interactor::watchlist_interactor::WatchlistInteractor;
use crate::view::watchlist_view::WatchlistView;
use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;

/// Watchlist dialogs. Every method returns the state the chat moves to.
#[async_trait]
pub trait WatchlistPresenter: Send + Sync {
    async fn start_add_token(&self) -> Result<State>;
    async fn select_network(&self, network: Network) -> Result<State>;
    async fn add_to_watchlist(&self, network: Network, token_address: &str) -> Result<State>;
    async fn show_watchlist(&self) -> Result<State>;
    async fn next_page(&self, current_page: Option<usize>) -> Result<State>;
    async fn previous_page(&self, current_page: Option<usize>) -> Result<State>;
    async fn show_token_detail(&self, symbol: &str) -> Result<()>;
    async fn start_remove_token(&self) -> Result<State>;
    async fn remove_from_watchlist(&self, symbol: &str) -> Result<State>;
}

pub struct WatchlistPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> WatchlistPresenterImpl<I, V>
where
    I: WatchlistInteractor,
    V: WatchlistView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }

    async fn show_page(&self, page: usize) -> Result<()> {
        match self.interactor.get_watchlist_page(page).await {
            Ok(items) if items.is_empty() => self.view.display_no_more_items().await,
            Ok(items) => self.view.display_watchlist_page(page, &items).await,
            Err(e) => self.view.display_error(e.to_string()).await,
        }
    }

    async fn watchlist_is_empty(&self) -> Result<bool> {
        Ok(self.interactor.get_watchlist().await?.is_empty())
    }
}

#[async_trait]
impl<I, V> WatchlistPresenter for WatchlistPresenterImpl<I, V>
where
    I: WatchlistInteractor + Send + Sync,
    V: WatchlistView + Send + Sync,
{
    async fn start_add_token(&self) -> Result<State> {
        self.view.prompt_for_network().await?;
        Ok(State::AwaitingNetwork)
    }

    async fn select_network(&self, network: Network) -> Result<State> {
        self.view.prompt_for_contract_address(network).await?;
        Ok(State::AwaitingContractAddress { network })
    }

    async fn add_to_watchlist(&self, network: Network, token_address: &str) -> Result<State> {
        match self.interactor.add_to_watchlist(network, token_address).await {
            Ok((entry, token)) => self.view.display_token_added(&entry, &token).await?,
            Err(BotError::DuplicateToken) => self.view.display_duplicate_token().await?,
            Err(BotError::DuplicateSymbol(symbol)) => {
                self.view.display_symbol_taken(&symbol).await?
            }
            Err(BotError::TokenNotFound) | Err(BotError::EmptyAddress) => {
                self.view.display_token_not_found().await?
            }
            Err(e) => {
                error!("Error processing contract address {}: {}", token_address, e);
                self.view
                    .display_error("could not add the token".to_string())
                    .await?
            }
        }

        Ok(State::Start)
    }

    async fn show_watchlist(&self) -> Result<State> {
        if self.watchlist_is_empty().await? {
            self.view.display_empty_watchlist().await?;
            return Ok(State::Start);
        }

        self.show_page(1).await?;
        Ok(State::BrowsingWatchlist { page: 1 })
    }

    async fn next_page(&self, current_page: Option<usize>) -> Result<State> {
        // not clamped: the stored page may point one or more pages past the end
        let page = current_page.unwrap_or(1).saturating_add(1);
        self.show_page(page).await?;
        Ok(State::BrowsingWatchlist { page })
    }

    async fn previous_page(&self, current_page: Option<usize>) -> Result<State> {
        let page = current_page.unwrap_or(1);
        if page <= 1 {
            return Ok(State::BrowsingWatchlist { page: 1 });
        }

        self.show_page(page - 1).await?;
        Ok(State::BrowsingWatchlist { page: page - 1 })
    }

    async fn show_token_detail(&self, symbol: &str) -> Result<()> {
        match self.interactor.get_watchlist_item(symbol).await {
            Ok(Some(item)) => self.view.display_token_detail(&item).await,
            Ok(None) => self.view.display_symbol_not_found().await,
            Err(e) => self.view.display_error(e.to_string()).await,
        }
    }

    async fn start_remove_token(&self) -> Result<State> {
        if self.watchlist_is_empty().await? {
            self.view.display_empty_watchlist().await?;
            return Ok(State::Start);
        }

        self.view.prompt_for_removal_symbol().await?;
        Ok(State::AwaitingRemovalSymbol)
    }

    async fn remove_from_watchlist(&self, symbol: &str) -> Result<State> {
        match self.interactor.remove_from_watchlist(symbol).await {
            Ok(_) => {
                self.view
                    .display_token_removed(&symbol.trim().to_uppercase())
                    .await?
            }
            Err(BotError::SymbolNotInWatchlist(symbol)) => {
                info!("Token symbol not found in watchlist for removal: {}", symbol);
                self.view.display_symbol_not_found().await?
            }
            Err(e) => self.view.display_error(e.to_string()).await?,
        }

        Ok(State::Start)
    }
}
