//! Token Watch Bot for Telegram - Main executable
//!
//! Starts the price poller in the background and then serves chats,
//! reconnecting with a growing delay while Telegram is unreachable.
use anyhow::Context;
use dotenv::dotenv;
use log::{error, info, warn};
use std::sync::Arc;
use teloxide::{dptree, prelude::*, Bot};
use token_watch_bot::commands::menu_commands;
use token_watch_bot::utils::Backoff;
use token_watch_bot::{AppConfig, Router, ServiceContainer};

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting Token Watch Telegram Bot v{}", token_watch_bot::VERSION);

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let mut backoff = Backoff::new(config.restart_delay(), config.max_restart_delay());

    // Create Telegram bot instance
    let bot = Bot::new(config.telegram_bot_token.clone());

    let service_container = Arc::new(ServiceContainer::new(config)?);

    info!("Initializing bot application...");
    let (router, storage, mut notification_service) =
        token_watch_bot::create_application(bot.clone(), service_container.clone());

    // Start the price poller
    info!("Starting notification background service...");
    if let Err(e) = notification_service.start().await {
        error!("Failed to start notification service: {}", e);
    }

    loop {
        match bot.get_me().await {
            Ok(me) => {
                info!("Connected to Telegram as @{}", me.username());
                backoff.reset();
            }
            Err(e) => {
                let delay = backoff.next_delay();
                error!(
                    "Failed to reach Telegram: {}. Retrying in {}s",
                    e,
                    delay.as_secs()
                );

                tokio::select! {
                    _ = tokio::time::sleep(delay) => continue,
                    _ = tokio::signal::ctrl_c() => {
                        info!("Interrupted while waiting to reconnect");
                        break;
                    }
                }
            }
        }

        if let Err(e) = bot.set_my_commands(menu_commands()).await {
            warn!("Failed to register the command menu: {}", e);
        }

        // Get the handler from the router
        let handler = router.setup_handlers();

        // Build dispatcher with dependency injections and control-C handling
        let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
            .dependencies(dptree::deps![service_container.clone(), storage.clone()])
            .enable_ctrlc_handler()
            .build();

        info!("Bot is running! Press Ctrl+C to stop.");
        dispatcher.dispatch().await;
        break;
    }

    info!("Stopping notification service...");
    notification_service.stop().await;

    Ok(())
}
