//! Telegram bot that keeps a shared watchlist of tokens and sends
//! percentage price-change notifications from a background poller.

pub mod commands;
pub mod config;
pub mod dexscreener;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod router;
pub mod services;
pub mod utils;
pub mod view;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use teloxide::{dispatching::dialogue::InMemStorage, Bot};

// Re-export commonly used items
pub use config::AppConfig;
pub use di::ServiceContainer;
pub use entity::*;
pub use router::{Router, TelegramRouter};
pub use services::notification_service::{
    NotificationEngine, NotificationService, TelegramAlertSink,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wires the router, dialogue storage and poller around a service container
pub fn create_application(
    bot: Bot,
    services: Arc<ServiceContainer>,
) -> (
    TelegramRouter,
    Arc<InMemStorage<State>>,
    NotificationService,
) {
    let config = services.config();

    let engine = Arc::new(NotificationEngine::new(
        services.db(),
        services.price_service(),
        Arc::new(TelegramAlertSink::new(bot)),
        config.request_spacing(),
    ));
    let notification_service = NotificationService::new(engine, config.poll_interval());

    let router = TelegramRouter::new(services);
    let storage = InMemStorage::<State>::new();

    (router, storage, notification_service)
}
