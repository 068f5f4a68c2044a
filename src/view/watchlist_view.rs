use crate::entity::{Network, Token, WatchlistEntry, WatchlistItem};
use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    Bot,
};

#[async_trait]
pub trait WatchlistView: Send + Sync {
    async fn prompt_for_network(&self) -> Result<()>;
    async fn prompt_for_contract_address(&self, network: Network) -> Result<()>;
    async fn display_token_added(&self, entry: &WatchlistEntry, token: &Token) -> Result<()>;
    async fn display_duplicate_token(&self) -> Result<()>;
    async fn display_symbol_taken(&self, symbol: &str) -> Result<()>;
    async fn display_token_not_found(&self) -> Result<()>;
    async fn display_empty_watchlist(&self) -> Result<()>;
    async fn display_watchlist_page(&self, page: usize, items: &[WatchlistItem]) -> Result<()>;
    async fn display_no_more_items(&self) -> Result<()>;
    async fn display_token_detail(&self, item: &WatchlistItem) -> Result<()>;
    async fn prompt_for_removal_symbol(&self) -> Result<()>;
    async fn display_token_removed(&self, symbol: &str) -> Result<()>;
    async fn display_symbol_not_found(&self) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub struct TelegramWatchlistView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramWatchlistView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    async fn send_text(&self, text: impl Into<String>) -> Result<()> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }
}

#[async_trait]
impl WatchlistView for TelegramWatchlistView {
    async fn prompt_for_network(&self) -> Result<()> {
        let keyboard = InlineKeyboardMarkup::new(Network::ALL.iter().map(|network| {
            vec![InlineKeyboardButton::callback(
                network.label(),
                format!("network_{}", network.code()),
            )]
        }));

        self.bot
            .send_message(self.chat_id, "🔍 Select the network for the token:")
            .reply_markup(keyboard)
            .await?;

        Ok(())
    }

    async fn prompt_for_contract_address(&self, network: Network) -> Result<()> {
        self.send_text(format!("📝 Enter {} token contract address:", network))
            .await
    }

    async fn display_token_added(&self, entry: &WatchlistEntry, token: &Token) -> Result<()> {
        self.send_text(format!(
            "✅ Token added to watchlist: {} ({})",
            token.name, entry.symbol
        ))
        .await
    }

    async fn display_duplicate_token(&self) -> Result<()> {
        self.send_text("❌ This token is already in your watchlist.")
            .await
    }

    async fn display_symbol_taken(&self, symbol: &str) -> Result<()> {
        self.send_text(format!(
            "❌ {} is already in the watchlist with a different contract address. Remove it first with /removewatchlist.",
            symbol
        ))
        .await
    }

    async fn display_token_not_found(&self) -> Result<()> {
        self.send_text("❌ Invalid contract address or token not found.")
            .await
    }

    async fn display_empty_watchlist(&self) -> Result<()> {
        self.send_text("🛑 Your watchlist is empty. Add tokens with /addtoken first.")
            .await
    }

    async fn display_watchlist_page(&self, page: usize, items: &[WatchlistItem]) -> Result<()> {
        let mut keyboard_buttons: Vec<Vec<InlineKeyboardButton>> = items
            .iter()
            .map(|item| {
                vec![InlineKeyboardButton::callback(
                    format!(
                        "{} ({}): {}$",
                        item.entry.symbol,
                        item.entry.network,
                        item.format_price()
                    ),
                    format!("watchlist_view_{}", item.entry.symbol),
                )]
            })
            .collect();

        keyboard_buttons.push(vec![
            InlineKeyboardButton::callback("⬅️ Previous", "watchlist_prev"),
            InlineKeyboardButton::callback("➡️ Next", "watchlist_next"),
        ]);

        self.bot
            .send_message(self.chat_id, format!("📋 Watchlist (Page {}):", page))
            .reply_markup(InlineKeyboardMarkup::new(keyboard_buttons))
            .await?;

        Ok(())
    }

    async fn display_no_more_items(&self) -> Result<()> {
        self.send_text("📄 No more items in your watchlist.").await
    }

    async fn display_token_detail(&self, item: &WatchlistItem) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!(
                    "<b>{} Token Details</b>\n\n\
                    • Network: <b>{}</b>\n\
                    • Address: <code>{}</code>\n\
                    • Current Price: <b>{}$</b>",
                    item.entry.symbol,
                    item.entry.network,
                    item.entry.address,
                    item.format_price()
                ),
            )
            .parse_mode(ParseMode::Html)
            .await?;

        Ok(())
    }

    async fn prompt_for_removal_symbol(&self) -> Result<()> {
        self.send_text("📝 Enter the symbol of the token you want to remove:")
            .await
    }

    async fn display_token_removed(&self, symbol: &str) -> Result<()> {
        self.send_text(format!(
            "✅ {} removed from watchlist and notifications.",
            symbol
        ))
        .await
    }

    async fn display_symbol_not_found(&self) -> Result<()> {
        self.send_text("❌ Token symbol not found in your watchlist.")
            .await
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        self.send_text(format!(
            "❌ An error occurred: {}. Please try again later.",
            error_message
        ))
        .await
    }
}
