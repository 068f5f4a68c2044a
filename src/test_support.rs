use crate::dexscreener::{PriceService, TokenRepository};
use crate::entity::{BotError, Network, Notification, Token, WatchlistEntry, WatchlistItem};
use crate::interactor::db::JsonDb;
use crate::services::notification_service::AlertSink;
use crate::view::notification_view::NotificationView;
use crate::view::watchlist_view::WatchlistView;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

/// Store over two files in a fresh temp directory
pub(crate) fn temp_db() -> JsonDb {
    let dir = std::env::temp_dir().join(format!("token-watch-bot-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    JsonDb::new(dir.join("watchlist.json"), dir.join("notifications.json"))
}

/// Runs `f` with environment variable overrides under a process-wide lock
pub(crate) fn with_locked_env<T>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> T) -> T {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard = LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .expect("env lock should not be poisoned");

    let previous = vars
        .iter()
        .map(|(name, _)| ((*name).to_string(), std::env::var(name).ok()))
        .collect::<Vec<_>>();

    for (name, value) in vars {
        match value {
            Some(v) => std::env::set_var(name, v),
            None => std::env::remove_var(name),
        }
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    for (name, value) in previous {
        match value {
            Some(v) => std::env::set_var(name, v),
            None => std::env::remove_var(name),
        }
    }

    match result {
        Ok(output) => output,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

pub(crate) async fn seed_watchlist(db: &JsonDb, entries: &[(&str, &str)]) {
    db.update_watchlist(|watchlist| {
        for (symbol, address) in entries {
            let entry = WatchlistEntry::new(symbol, Network::Ethereum, address);
            watchlist.insert(entry.symbol.clone(), entry);
        }
        Ok(())
    })
    .await
    .expect("seeding should succeed");
}

pub(crate) async fn seed_notification(db: &JsonDb, notification: Notification) {
    db.update_notifications(|notifications| {
        notifications.insert(notification.symbol.clone(), notification);
        Ok(())
    })
    .await
    .expect("seeding should succeed");
}

#[derive(Default)]
pub(crate) struct FakeTokenRepository {
    tokens: HashMap<String, Token>,
    failing: bool,
    calls: AtomicUsize,
}

impl FakeTokenRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_token(mut self, address: &str, symbol: &str, name: &str) -> Self {
        self.tokens.insert(
            address.to_lowercase(),
            Token {
                chain_id: "ethereum".to_string(),
                symbol: symbol.to_string(),
                name: name.to_string(),
            },
        );
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenRepository for FakeTokenRepository {
    async fn resolve_token(
        &self,
        address: &str,
        _network: Network,
    ) -> Result<Option<Token>, BotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(BotError::Lookup("connection reset".to_string()));
        }
        Ok(self.tokens.get(&address.trim().to_lowercase()).cloned())
    }
}

#[derive(Default)]
pub(crate) struct FakePriceService {
    prices: Mutex<HashMap<String, f64>>,
    failing: Mutex<HashSet<String>>,
}

impl FakePriceService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_price(&self, address: &str, price: f64) {
        self.prices
            .lock()
            .unwrap()
            .insert(address.to_lowercase(), price);
    }

    pub(crate) fn fail(&self, address: &str) {
        self.failing.lock().unwrap().insert(address.to_lowercase());
    }
}

#[async_trait]
impl PriceService for FakePriceService {
    async fn get_token_price(&self, address: &str) -> Result<Option<f64>, BotError> {
        let address = address.to_lowercase();
        if self.failing.lock().unwrap().contains(&address) {
            return Err(BotError::Lookup("timeout".to_string()));
        }
        Ok(self.prices.lock().unwrap().get(&address).copied())
    }
}

#[derive(Default)]
pub(crate) struct RecordingWatchlistView {
    events: Mutex<Vec<String>>,
}

impl RecordingWatchlistView {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) -> Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

#[async_trait]
impl WatchlistView for RecordingWatchlistView {
    async fn prompt_for_network(&self) -> Result<()> {
        self.record("prompt_network".to_string())
    }

    async fn prompt_for_contract_address(&self, network: Network) -> Result<()> {
        self.record(format!("prompt_address:{}", network.code()))
    }

    async fn display_token_added(&self, entry: &WatchlistEntry, token: &Token) -> Result<()> {
        self.record(format!("token_added:{}:{}", entry.symbol, token.name))
    }

    async fn display_duplicate_token(&self) -> Result<()> {
        self.record("duplicate_token".to_string())
    }

    async fn display_symbol_taken(&self, symbol: &str) -> Result<()> {
        self.record(format!("symbol_taken:{}", symbol))
    }

    async fn display_token_not_found(&self) -> Result<()> {
        self.record("token_not_found".to_string())
    }

    async fn display_empty_watchlist(&self) -> Result<()> {
        self.record("empty_watchlist".to_string())
    }

    async fn display_watchlist_page(&self, page: usize, items: &[WatchlistItem]) -> Result<()> {
        let symbols: Vec<String> = items
            .iter()
            .map(|item| format!("{}={}", item.entry.symbol, item.format_price()))
            .collect();
        self.record(format!("page:{}:{}", page, symbols.join(",")))
    }

    async fn display_no_more_items(&self) -> Result<()> {
        self.record("no_more_items".to_string())
    }

    async fn display_token_detail(&self, item: &WatchlistItem) -> Result<()> {
        self.record(format!("detail:{}:{}", item.entry.symbol, item.format_price()))
    }

    async fn prompt_for_removal_symbol(&self) -> Result<()> {
        self.record("prompt_removal".to_string())
    }

    async fn display_token_removed(&self, symbol: &str) -> Result<()> {
        self.record(format!("token_removed:{}", symbol))
    }

    async fn display_symbol_not_found(&self) -> Result<()> {
        self.record("symbol_not_found".to_string())
    }

    async fn display_error(&self, _error_message: String) -> Result<()> {
        self.record("error".to_string())
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotificationView {
    events: Mutex<Vec<String>>,
}

impl RecordingNotificationView {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) -> Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

#[async_trait]
impl NotificationView for RecordingNotificationView {
    async fn display_empty_watchlist(&self) -> Result<()> {
        self.record("empty_watchlist".to_string())
    }

    async fn prompt_for_symbol(&self) -> Result<()> {
        self.record("prompt_symbol".to_string())
    }

    async fn prompt_for_details(&self, symbol: &str) -> Result<()> {
        self.record(format!("prompt_details:{}", symbol))
    }

    async fn display_symbol_not_found(&self) -> Result<()> {
        self.record("symbol_not_found".to_string())
    }

    async fn display_notification_set(&self, notification: &Notification) -> Result<()> {
        self.record(format!(
            "notification_set:{}:{}:{}",
            notification.symbol, notification.change_type, notification.threshold_percentage
        ))
    }

    async fn display_invalid_format(&self) -> Result<()> {
        self.record("invalid_format".to_string())
    }

    async fn display_notifications(&self, notifications: &[Notification]) -> Result<()> {
        let symbols: Vec<&str> = notifications.iter().map(|n| n.symbol.as_str()).collect();
        self.record(format!("notifications:{}", symbols.join(",")))
    }

    async fn display_no_notifications(&self) -> Result<()> {
        self.record("no_notifications".to_string())
    }

    async fn display_removal_options(&self, notifications: &[Notification]) -> Result<()> {
        let symbols: Vec<&str> = notifications.iter().map(|n| n.symbol.as_str()).collect();
        self.record(format!("removal_options:{}", symbols.join(",")))
    }

    async fn display_notification_removed(&self, symbol: &str) -> Result<()> {
        self.record(format!("notification_removed:{}", symbol))
    }

    async fn display_invalid_selection(&self) -> Result<()> {
        self.record("invalid_selection".to_string())
    }

    async fn display_error(&self, _error_message: String) -> Result<()> {
        self.record("error".to_string())
    }
}

#[derive(Default)]
pub(crate) struct RecordingAlertSink {
    sent: Mutex<Vec<(i64, String)>>,
}

impl RecordingAlertSink {
    pub(crate) fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSink for RecordingAlertSink {
    async fn send_alert(&self, chat_id: i64, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}
