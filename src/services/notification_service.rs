use crate::dexscreener::PriceService;
use crate::entity::{ChangeType, Notification};
use crate::interactor::db::JsonDb;
use crate::utils::format_price;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use futures::FutureExt;
use log::{debug, error, info, warn};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use teloxide::{prelude::*, Bot};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};

/// Delivery of alert messages to a chat
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send_alert(&self, chat_id: i64, text: &str) -> Result<()>;
}

pub struct TelegramAlertSink {
    bot: Bot,
}

impl TelegramAlertSink {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl AlertSink for TelegramAlertSink {
    async fn send_alert(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot.send_message(ChatId(chat_id), text).await?;
        Ok(())
    }
}

/// A fired notification
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub chat_id: i64,
    pub symbol: String,
    pub change_type: ChangeType,
    pub threshold_percentage: f64,
    pub change_percentage: f64,
    pub price: f64,
}

impl Alert {
    fn new(notification: &Notification, change_percentage: f64, price: f64) -> Self {
        Self {
            chat_id: notification.chat_id,
            symbol: notification.symbol.clone(),
            change_type: notification.change_type,
            threshold_percentage: notification.threshold_percentage,
            change_percentage,
            price,
        }
    }

    pub fn message(&self) -> String {
        let icon = match self.change_type {
            ChangeType::Up => "📈",
            ChangeType::Down => "📉",
        };

        format!(
            "{} {} price has gone {} by {:.2}% (alert at {}%). Current price: ${}",
            icon,
            self.symbol,
            self.change_type,
            self.change_percentage.abs(),
            self.threshold_percentage,
            format_price(self.price)
        )
    }
}

/// One polling pass over the watchlist and notifications
pub struct NotificationEngine {
    db: Arc<JsonDb>,
    price_service: Arc<dyn PriceService + Send + Sync>,
    alert_sink: Arc<dyn AlertSink>,
    request_spacing: Duration,
}

impl NotificationEngine {
    pub fn new(
        db: Arc<JsonDb>,
        price_service: Arc<dyn PriceService + Send + Sync>,
        alert_sink: Arc<dyn AlertSink>,
        request_spacing: Duration,
    ) -> Self {
        Self {
            db,
            price_service,
            alert_sink,
            request_spacing,
        }
    }

    /// Sample every watchlist price, evaluate notifications, save them once and send alerts
    pub async fn run_cycle(&self) -> Result<Vec<Alert>> {
        let watchlist = self.db.get_watchlist().await;
        let notifications = self.db.get_notifications().await;

        if watchlist.is_empty() {
            debug!("Watchlist is empty, nothing to poll");
            return Ok(Vec::new());
        }

        info!("Getting prices for {} tokens", watchlist.len());

        let mut samples = Vec::new();
        for (symbol, entry) in &watchlist {
            match self.price_service.get_token_price(&entry.address).await {
                Ok(Some(price)) => {
                    debug!("Got price for {}: ${}", symbol, price);
                    if notifications.contains_key(symbol) {
                        samples.push((symbol.clone(), price));
                    }
                }
                Ok(None) => error!("Failed to fetch price for {}", entry.symbol),
                Err(e) => error!("Failed to fetch price for {}: {}", entry.symbol, e),
            }

            if !self.request_spacing.is_zero() {
                sleep(self.request_spacing).await;
            }
        }

        if samples.is_empty() {
            return Ok(Vec::new());
        }

        // evaluate against the stored records as they are now, not as read before the lookups
        let alerts = self
            .db
            .update_notifications(|notifications| {
                let mut alerts = Vec::new();

                for (symbol, price) in &samples {
                    let Some(notification) = notifications.get_mut(symbol) else {
                        debug!("Notification for {} was removed during the cycle", symbol);
                        continue;
                    };

                    if let Some(change) = notification.observe(*price) {
                        notification.last_triggered_at = Some(Utc::now());
                        alerts.push(Alert::new(notification, change, *price));
                    }
                }

                Ok(alerts)
            })
            .await?;

        for alert in &alerts {
            match self.alert_sink.send_alert(alert.chat_id, &alert.message()).await {
                Ok(()) => info!(
                    "Notification triggered for {}: {} by {:.2}% at price ${}",
                    alert.symbol,
                    alert.change_type,
                    alert.change_percentage,
                    format_price(alert.price)
                ),
                Err(e) => error!(
                    "Failed to deliver alert for {} to chat {}: {}",
                    alert.symbol, alert.chat_id, e
                ),
            }
        }

        Ok(alerts)
    }
}

/// Runs the engine in the background, pausing a fixed interval between passes
pub struct NotificationService {
    engine: Arc<NotificationEngine>,
    poll_interval: Duration,
    stop_tx: Option<mpsc::Sender<()>>,
}

impl NotificationService {
    pub fn new(engine: Arc<NotificationEngine>, poll_interval: Duration) -> Self {
        Self {
            engine,
            poll_interval,
            stop_tx: None,
        }
    }

    // Start the background task; the first pass runs immediately
    pub async fn start(&mut self) -> Result<()> {
        if self.stop_tx.is_some() {
            warn!("Notification service is already running");
            return Ok(());
        }

        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);
        self.stop_tx = Some(stop_tx);

        let engine = self.engine.clone();
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            loop {
                let started = Instant::now();

                // a failing pass must never end the loop
                match AssertUnwindSafe(engine.run_cycle()).catch_unwind().await {
                    Ok(Ok(alerts)) => debug!(
                        "Price poll finished in {:.2?}, {} alerts",
                        started.elapsed(),
                        alerts.len()
                    ),
                    Ok(Err(e)) => error!("Error in price polling loop: {}", e),
                    Err(_) => error!("Price polling pass panicked"),
                }

                // the pause runs from the end of one pass to the start of the next
                select! {
                    _ = sleep(poll_interval) => {}
                    _ = stop_rx.recv() => {
                        info!("Stopping notification service");
                        break;
                    }
                }
            }
        });

        info!("Notification service started");
        Ok(())
    }

    // Stop the background task
    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(()).await;
            info!("Notification service stop signal sent");
        }
    }
}
