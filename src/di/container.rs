use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::dexscreener::{
    DexScreenerClient, DexScreenerPriceService, DexScreenerTokenRepository, PriceService,
    TokenRepository,
};
use crate::interactor::db::JsonDb;

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Persistence
    db: Arc<JsonDb>,

    // DEX Screener services
    token_repository: Arc<dyn TokenRepository + Send + Sync>,
    price_service: Arc<dyn PriceService + Send + Sync>,

    // Configuration
    config: AppConfig,
}

impl ServiceContainer {
    /// Create a new service container from the application configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        info!(
            "Using watchlist {} and notifications {}",
            config.watchlist_file.display(),
            config.notifications_file.display()
        );
        let db = Arc::new(JsonDb::new(
            config.watchlist_file.clone(),
            config.notifications_file.clone(),
        ));

        let client = Arc::new(
            DexScreenerClient::new(&config.dexscreener_api_url, config.request_timeout())
                .context("Failed to create DEX Screener client")?,
        );

        let token_repository = Arc::new(DexScreenerTokenRepository::new(client.clone()))
            as Arc<dyn TokenRepository + Send + Sync>;
        let price_service =
            Arc::new(DexScreenerPriceService::new(client)) as Arc<dyn PriceService + Send + Sync>;

        Ok(Self::with_services(
            config,
            db,
            token_repository,
            price_service,
        ))
    }

    /// Assemble a container from already built services
    pub fn with_services(
        config: AppConfig,
        db: Arc<JsonDb>,
        token_repository: Arc<dyn TokenRepository + Send + Sync>,
        price_service: Arc<dyn PriceService + Send + Sync>,
    ) -> Self {
        Self {
            db,
            token_repository,
            price_service,
            config,
        }
    }

    // Accessor methods

    pub fn db(&self) -> Arc<JsonDb> {
        self.db.clone()
    }

    pub fn token_repository(&self) -> Arc<dyn TokenRepository + Send + Sync> {
        self.token_repository.clone()
    }

    pub fn price_service(&self) -> Arc<dyn PriceService + Send + Sync> {
        self.price_service.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
