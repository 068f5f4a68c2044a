use crate::entity::{BotError, State};
use crate::interactor::notification_interactor::NotificationInteractor;
use crate::view::notification_view::NotificationView;
use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;

/// Notification dialogs. Methods that move the chat return its next state.
#[async_trait]
pub trait NotificationPresenter: Send + Sync {
    async fn start_add_notification(&self) -> Result<State>;
    async fn select_symbol(&self, symbol: &str) -> Result<State>;
    async fn set_notification(&self, chat_id: i64, symbol: &str, details: &str) -> Result<State>;
    async fn show_notifications(&self, chat_id: i64) -> Result<()>;
    async fn show_removal_options(&self, chat_id: i64) -> Result<()>;
    async fn remove_notification(&self, chat_id: i64, symbol: &str) -> Result<()>;
}

pub struct NotificationPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> NotificationPresenterImpl<I, V>
where
    I: NotificationInteractor,
    V: NotificationView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> NotificationPresenter for NotificationPresenterImpl<I, V>
where
    I: NotificationInteractor + Send + Sync,
    V: NotificationView + Send + Sync,
{
    async fn start_add_notification(&self) -> Result<State> {
        if !self.interactor.has_watchlist_tokens().await? {
            self.view.display_empty_watchlist().await?;
            return Ok(State::Start);
        }

        self.view.prompt_for_symbol().await?;
        Ok(State::AwaitingNotificationSymbol)
    }

    async fn select_symbol(&self, symbol: &str) -> Result<State> {
        match self.interactor.find_watchlist_symbol(symbol).await {
            Ok(symbol) => {
                self.view.prompt_for_details(&symbol).await?;
                Ok(State::AwaitingNotificationDetails { symbol })
            }
            Err(BotError::SymbolNotInWatchlist(_)) => {
                self.view.display_symbol_not_found().await?;
                Ok(State::Start)
            }
            Err(e) => {
                self.view.display_error(e.to_string()).await?;
                Ok(State::Start)
            }
        }
    }

    async fn set_notification(&self, chat_id: i64, symbol: &str, details: &str) -> Result<State> {
        match self
            .interactor
            .set_notification(chat_id, symbol, details)
            .await
        {
            Ok(notification) => self.view.display_notification_set(&notification).await?,
            Err(BotError::InvalidNotificationFormat(_)) => {
                self.view.display_invalid_format().await?
            }
            Err(e) => {
                error!("Failed to set notification for {}: {}", symbol, e);
                self.view.display_error(e.to_string()).await?
            }
        }

        // a malformed entry restarts the whole flow
        Ok(State::Start)
    }

    async fn show_notifications(&self, chat_id: i64) -> Result<()> {
        match self.interactor.get_notifications(chat_id).await {
            Ok(notifications) if notifications.is_empty() => {
                self.view.display_no_notifications().await
            }
            Ok(notifications) => self.view.display_notifications(&notifications).await,
            Err(e) => self.view.display_error(e.to_string()).await,
        }
    }

    async fn show_removal_options(&self, chat_id: i64) -> Result<()> {
        match self.interactor.get_notifications(chat_id).await {
            Ok(notifications) if notifications.is_empty() => {
                self.view.display_no_notifications().await
            }
            Ok(notifications) => self.view.display_removal_options(&notifications).await,
            Err(e) => self.view.display_error(e.to_string()).await,
        }
    }

    async fn remove_notification(&self, chat_id: i64, symbol: &str) -> Result<()> {
        match self.interactor.remove_notification(chat_id, symbol).await {
            Ok(()) => self.view.display_notification_removed(symbol).await,
            Err(BotError::InvalidSelection(_)) => {
                info!("Invalid notification selection {} from chat {}", symbol, chat_id);
                self.view.display_invalid_selection().await
            }
            Err(e) => self.view.display_error(e.to_string()).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ChangeType, Notification};
    use crate::interactor::db::JsonDb;
    use crate::interactor::notification_interactor::NotificationInteractorImpl;
    use crate::test_support::{
        seed_notification, seed_watchlist, temp_db, RecordingNotificationView,
    };

    struct Fixture {
        db: Arc<JsonDb>,
        view: Arc<RecordingNotificationView>,
        presenter: NotificationPresenterImpl<NotificationInteractorImpl, RecordingNotificationView>,
    }

    fn fixture() -> Fixture {
        let db = Arc::new(temp_db());
        let view = Arc::new(RecordingNotificationView::default());
        let interactor = Arc::new(NotificationInteractorImpl::new(db.clone()));
        let presenter = NotificationPresenterImpl::new(interactor, view.clone());
        Fixture {
            db,
            view,
            presenter,
        }
    }

    #[tokio::test]
    async fn test_add_notification_dialog() {
        let f = fixture();
        seed_watchlist(&f.db, &[("PEPE", "0x1")]).await;

        let state = f.presenter.start_add_notification().await.unwrap();
        assert_eq!(state, State::AwaitingNotificationSymbol);

        let state = f.presenter.select_symbol("pepe").await.unwrap();
        assert_eq!(
            state,
            State::AwaitingNotificationDetails {
                symbol: "PEPE".to_string()
            }
        );

        let state = f.presenter.set_notification(42, "PEPE", "up 10%").await.unwrap();
        assert_eq!(state, State::Start);

        assert_eq!(
            f.view.events(),
            vec!["prompt_symbol", "prompt_details:PEPE", "notification_set:PEPE:up:10"]
        );
        let stored = &f.db.get_notifications().await["PEPE"];
        assert_eq!(stored.chat_id, 42);
        assert_eq!(stored.previous_price, None);
    }

    #[tokio::test]
    async fn test_empty_watchlist_refuses_notifications() {
        let f = fixture();
        assert_eq!(f.presenter.start_add_notification().await.unwrap(), State::Start);
        assert_eq!(f.view.events(), vec!["empty_watchlist"]);
    }

    #[tokio::test]
    async fn test_unknown_symbol_leaves_the_dialog() {
        let f = fixture();
        seed_watchlist(&f.db, &[("PEPE", "0x1")]).await;

        let state = f.presenter.select_symbol("DOGE").await.unwrap();

        // idle chats route no free text, so the next message is not taken as a symbol
        assert_eq!(state, State::Start);
        assert_eq!(f.view.events(), vec!["symbol_not_found"]);
    }

    #[tokio::test]
    async fn test_malformed_details_reset_to_idle() {
        let f = fixture();
        seed_watchlist(&f.db, &[("PEPE", "0x1")]).await;

        let state = f
            .presenter
            .set_notification(42, "PEPE", "sideways 5%")
            .await
            .unwrap();

        assert_eq!(state, State::Start);
        assert_eq!(f.view.events(), vec!["invalid_format"]);
        assert!(f.db.get_notifications().await.is_empty());
    }

    #[tokio::test]
    async fn test_view_and_remove_notifications() {
        let f = fixture();
        seed_notification(&f.db, Notification::new(1, "PEPE", ChangeType::Up, 5.0)).await;
        seed_notification(&f.db, Notification::new(2, "DOGE", ChangeType::Down, 5.0)).await;

        f.presenter.show_notifications(1).await.unwrap();
        f.presenter.show_notifications(3).await.unwrap();
        f.presenter.show_removal_options(1).await.unwrap();
        f.presenter.remove_notification(1, "DOGE").await.unwrap();
        f.presenter.remove_notification(1, "PEPE").await.unwrap();
        f.presenter.show_removal_options(1).await.unwrap();

        assert_eq!(
            f.view.events(),
            vec![
                "notifications:PEPE",
                "no_notifications",
                "removal_options:PEPE",
                "invalid_selection",
                "notification_removed:PEPE",
                "no_notifications",
            ]
        );
        assert!(f.db.get_notifications().await.contains_key("DOGE"));
    }
}
