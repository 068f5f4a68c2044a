use crate::entity::Notification;
use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
    Bot,
};

#[async_trait]
pub trait NotificationView: Send + Sync {
    async fn display_empty_watchlist(&self) -> Result<()>;
    async fn prompt_for_symbol(&self) -> Result<()>;
    async fn prompt_for_details(&self, symbol: &str) -> Result<()>;
    async fn display_symbol_not_found(&self) -> Result<()>;
    async fn display_notification_set(&self, notification: &Notification) -> Result<()>;
    async fn display_invalid_format(&self) -> Result<()>;
    async fn display_notifications(&self, notifications: &[Notification]) -> Result<()>;
    async fn display_no_notifications(&self) -> Result<()>;
    async fn display_removal_options(&self, notifications: &[Notification]) -> Result<()>;
    async fn display_notification_removed(&self, symbol: &str) -> Result<()>;
    async fn display_invalid_selection(&self) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub struct TelegramNotificationView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotificationView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    async fn send_text(&self, text: impl Into<String>) -> Result<()> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationView for TelegramNotificationView {
    async fn display_empty_watchlist(&self) -> Result<()> {
        self.send_text("🛑 Your watchlist is empty. Add tokens to your watchlist first.")
            .await
    }

    async fn prompt_for_symbol(&self) -> Result<()> {
        self.send_text(
            "📝 Enter the symbol of the token for which you want to add a notification:",
        )
        .await
    }

    async fn prompt_for_details(&self, symbol: &str) -> Result<()> {
        self.send_text(format!(
            "📝 Enter the notification details for {} (e.g., 'up 10%' or 'down 20%'):",
            symbol
        ))
        .await
    }

    async fn display_symbol_not_found(&self) -> Result<()> {
        self.send_text(
            "❌ Token symbol not found in your watchlist. Use /addnotification to start again.",
        )
        .await
    }

    async fn display_notification_set(&self, notification: &Notification) -> Result<()> {
        self.send_text(format!(
            "🔔 Notification set: {} will notify when price goes {} by {}%.",
            notification.symbol, notification.change_type, notification.threshold_percentage
        ))
        .await
    }

    async fn display_invalid_format(&self) -> Result<()> {
        self.send_text(
            "❌ Invalid format. Use /addnotification and enter the details like 'up 10%' or 'down 20%'.",
        )
        .await
    }

    async fn display_notifications(&self, notifications: &[Notification]) -> Result<()> {
        let mut response = String::from("📩 Your Notifications:\n");

        for notification in notifications {
            response.push_str(&notification.describe());
            if let Some(triggered_at) = notification.last_triggered_at {
                response.push_str(&format!(
                    " (last fired {})",
                    triggered_at.format("%Y-%m-%d %H:%M UTC")
                ));
            }
            response.push('\n');
        }

        self.send_text(response).await
    }

    async fn display_no_notifications(&self) -> Result<()> {
        self.send_text("🛑 You have no notifications set.").await
    }

    async fn display_removal_options(&self, notifications: &[Notification]) -> Result<()> {
        let keyboard = InlineKeyboardMarkup::new(notifications.iter().map(|notification| {
            vec![InlineKeyboardButton::callback(
                format!("{} 🚫", notification.symbol),
                format!("remove_notification_{}", notification.symbol),
            )]
        }));

        self.bot
            .send_message(self.chat_id, "📋 Select the notification to remove:")
            .reply_markup(keyboard)
            .await?;

        Ok(())
    }

    async fn display_notification_removed(&self, symbol: &str) -> Result<()> {
        self.send_text(format!("✅ Notification for {} removed.", symbol))
            .await
    }

    async fn display_invalid_selection(&self) -> Result<()> {
        self.send_text("❌ Invalid notification selection.").await
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        self.send_text(format!(
            "❌ An error occurred: {}. Please try again later.",
            error_message
        ))
        .await
    }
}
