use crate::entity::{BotError, Notification};
use crate::interactor::db::JsonDb;
use crate::utils::parse_notification_details;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

#[async_trait]
pub trait NotificationInteractor: Send + Sync {
    async fn has_watchlist_tokens(&self) -> Result<bool, BotError>;
    /// Canonical symbol if it is on the watchlist
    async fn find_watchlist_symbol(&self, symbol: &str) -> Result<String, BotError>;
    async fn set_notification(
        &self,
        chat_id: i64,
        symbol: &str,
        details: &str,
    ) -> Result<Notification, BotError>;
    async fn get_notifications(&self, chat_id: i64) -> Result<Vec<Notification>, BotError>;
    async fn remove_notification(&self, chat_id: i64, symbol: &str) -> Result<(), BotError>;
}

pub struct NotificationInteractorImpl {
    db: Arc<JsonDb>,
}

impl NotificationInteractorImpl {
    pub fn new(db: Arc<JsonDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationInteractor for NotificationInteractorImpl {
    async fn has_watchlist_tokens(&self) -> Result<bool, BotError> {
        Ok(!self.db.get_watchlist().await.is_empty())
    }

    async fn find_watchlist_symbol(&self, symbol: &str) -> Result<String, BotError> {
        let symbol = symbol.trim().to_uppercase();

        if self.db.get_watchlist().await.contains_key(&symbol) {
            Ok(symbol)
        } else {
            warn!("Token symbol not found in watchlist: {}", symbol);
            Err(BotError::SymbolNotInWatchlist(symbol))
        }
    }

    async fn set_notification(
        &self,
        chat_id: i64,
        symbol: &str,
        details: &str,
    ) -> Result<Notification, BotError> {
        info!(
            "Received notification details: {} for symbol: {}",
            details, symbol
        );

        let (change_type, threshold) = parse_notification_details(details).ok_or_else(|| {
            warn!("Invalid format received for notification details: {}", details);
            BotError::InvalidNotificationFormat(details.to_string())
        })?;

        let notification = Notification::new(chat_id, symbol, change_type, threshold);
        let stored = notification.clone();

        self.db
            .update_notifications(move |notifications| {
                // one rule per symbol, a new one replaces the old
                notifications.insert(stored.symbol.clone(), stored);
                Ok(())
            })
            .await?;

        info!(
            "Notification set for {}: {} by {}%",
            symbol, change_type, threshold
        );

        Ok(notification)
    }

    async fn get_notifications(&self, chat_id: i64) -> Result<Vec<Notification>, BotError> {
        Ok(self
            .db
            .get_notifications()
            .await
            .into_values()
            .filter(|notification| notification.chat_id == chat_id)
            .collect())
    }

    async fn remove_notification(&self, chat_id: i64, symbol: &str) -> Result<(), BotError> {
        self.db
            .update_notifications(|notifications| {
                let owned = notifications
                    .get(symbol)
                    .is_some_and(|notification| notification.chat_id == chat_id);
                if !owned {
                    return Err(BotError::InvalidSelection(symbol.to_string()));
                }

                notifications.shift_remove(symbol);
                Ok(())
            })
            .await?;

        info!("Notification removed for {}", symbol);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ChangeType;
    use crate::test_support::{seed_notification, seed_watchlist, temp_db};

    #[tokio::test]
    async fn test_symbol_lookup_is_case_insensitive() {
        let db = Arc::new(temp_db());
        let interactor = NotificationInteractorImpl::new(db.clone());
        assert!(!interactor.has_watchlist_tokens().await.unwrap());

        seed_watchlist(&db, &[("PEPE", "0x1")]).await;

        assert!(interactor.has_watchlist_tokens().await.unwrap());
        assert_eq!(interactor.find_watchlist_symbol(" pepe ").await.unwrap(), "PEPE");
        assert!(matches!(
            interactor.find_watchlist_symbol("DOGE").await,
            Err(BotError::SymbolNotInWatchlist(_))
        ));
    }

    #[tokio::test]
    async fn test_set_notification_overwrites_with_fresh_baseline() {
        let db = Arc::new(temp_db());
        let mut existing = Notification::new(1, "PEPE", ChangeType::Up, 50.0);
        existing.previous_price = Some(3.0);
        seed_notification(&db, existing).await;

        let interactor = NotificationInteractorImpl::new(db.clone());
        let notification = interactor
            .set_notification(2, "PEPE", "Down 20%")
            .await
            .unwrap();

        assert_eq!(notification.change_type, ChangeType::Down);
        assert_eq!(notification.threshold_percentage, 20.0);

        let stored = db.get_notifications().await;
        assert_eq!(stored.len(), 1);
        let stored = &stored["PEPE"];
        assert_eq!(stored.chat_id, 2);
        assert_eq!(stored.previous_price, None);
    }

    #[tokio::test]
    async fn test_malformed_details_are_not_stored() {
        let db = Arc::new(temp_db());
        let interactor = NotificationInteractorImpl::new(db.clone());

        for details in ["sideways 5%", "up abc"] {
            assert!(matches!(
                interactor.set_notification(1, "PEPE", details).await,
                Err(BotError::InvalidNotificationFormat(_))
            ));
        }
        assert!(db.get_notifications().await.is_empty());
    }

    #[tokio::test]
    async fn test_notifications_are_filtered_by_chat() {
        let db = Arc::new(temp_db());
        seed_notification(&db, Notification::new(1, "PEPE", ChangeType::Up, 5.0)).await;
        seed_notification(&db, Notification::new(2, "DOGE", ChangeType::Up, 5.0)).await;
        seed_notification(&db, Notification::new(1, "WIF", ChangeType::Down, 5.0)).await;

        let interactor = NotificationInteractorImpl::new(db);
        let mine: Vec<String> = interactor
            .get_notifications(1)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.symbol)
            .collect();

        assert_eq!(mine, vec!["PEPE", "WIF"]);
    }

    #[tokio::test]
    async fn test_remove_requires_ownership() {
        let db = Arc::new(temp_db());
        seed_notification(&db, Notification::new(1, "PEPE", ChangeType::Up, 5.0)).await;
        let interactor = NotificationInteractorImpl::new(db.clone());

        assert!(matches!(
            interactor.remove_notification(2, "PEPE").await,
            Err(BotError::InvalidSelection(_))
        ));
        assert!(matches!(
            interactor.remove_notification(1, "DOGE").await,
            Err(BotError::InvalidSelection(_))
        ));
        assert_eq!(db.get_notifications().await.len(), 1);

        interactor.remove_notification(1, "PEPE").await.unwrap();
        assert!(db.get_notifications().await.is_empty());
    }
}
