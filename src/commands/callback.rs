use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use teloxide::prelude::*;

use crate::commands::notification::notification_presenter;
use crate::commands::watchlist::watchlist_presenter;
use crate::commands::MyDialogue;
use crate::di::ServiceContainer;
use crate::entity::{Network, State};
use crate::presenter::notification_presenter::NotificationPresenter;
use crate::presenter::watchlist_presenter::WatchlistPresenter;

/// What a callback token asks for
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackAction {
    SelectNetwork(Network),
    NextPage,
    PreviousPage,
    ViewToken(String),
    RemoveNotification(String),
}

impl CallbackAction {
    /// Routes a callback token by its prefix
    pub fn parse(data: &str) -> Option<Self> {
        if let Some(code) = data.strip_prefix("network_") {
            return code.parse().ok().map(CallbackAction::SelectNetwork);
        }

        match data {
            "watchlist_next" => return Some(CallbackAction::NextPage),
            "watchlist_prev" => return Some(CallbackAction::PreviousPage),
            _ => {}
        }

        if let Some(symbol) = data.strip_prefix("watchlist_view_") {
            return Some(CallbackAction::ViewToken(symbol.to_string()));
        }

        data.strip_prefix("remove_notification_")
            .map(|symbol| CallbackAction::RemoveNotification(symbol.to_string()))
    }
}

/// State after a page button: a chat in the middle of another dialog keeps it
fn after_page_turn(current: Option<State>, turned: State) -> State {
    match current {
        None | Some(State::Start) | Some(State::BrowsingWatchlist { .. }) => turned,
        Some(dialog) => dialog,
    }
}

// Main callback handler function
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    // Acknowledge the callback query to stop loading animation
    if let Err(err) = bot.answer_callback_query(q.id.clone()).await {
        info!("Failed to answer callback query: {}", err);
    }

    let Some(callback_data) = q.data.as_deref() else {
        return Ok(());
    };

    let chat_id = match q.message {
        Some(ref msg) => msg.chat().id,
        None => return Ok(()),
    };

    info!("Received callback: {} from chat {}", callback_data, chat_id);

    let Some(action) = CallbackAction::parse(callback_data) else {
        warn!("Unknown callback data: {}", callback_data);
        return Ok(());
    };

    match action {
        CallbackAction::SelectNetwork(network) => {
            let presenter = watchlist_presenter(bot, chat_id, &services);
            let state = presenter.select_network(network).await?;
            dialogue.update(state).await?;
        }
        CallbackAction::NextPage => {
            let current = dialogue.get().await?;
            let current_page = current.as_ref().and_then(State::current_page);
            let presenter = watchlist_presenter(bot, chat_id, &services);
            let turned = presenter.next_page(current_page).await?;
            dialogue.update(after_page_turn(current, turned)).await?;
        }
        CallbackAction::PreviousPage => {
            let current = dialogue.get().await?;
            let current_page = current.as_ref().and_then(State::current_page);
            let presenter = watchlist_presenter(bot, chat_id, &services);
            let turned = presenter.previous_page(current_page).await?;
            dialogue.update(after_page_turn(current, turned)).await?;
        }
        CallbackAction::ViewToken(symbol) => {
            let presenter = watchlist_presenter(bot, chat_id, &services);
            presenter.show_token_detail(&symbol).await?;
        }
        CallbackAction::RemoveNotification(symbol) => {
            let presenter = notification_presenter(bot, chat_id, &services);
            presenter.remove_notification(chat_id.0, &symbol).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_callback_tokens() {
        assert_eq!(
            CallbackAction::parse("network_sol"),
            Some(CallbackAction::SelectNetwork(Network::Solana))
        );
        assert_eq!(
            CallbackAction::parse("network_bsc"),
            Some(CallbackAction::SelectNetwork(Network::Bsc))
        );
        assert_eq!(CallbackAction::parse("watchlist_next"), Some(CallbackAction::NextPage));
        assert_eq!(
            CallbackAction::parse("watchlist_prev"),
            Some(CallbackAction::PreviousPage)
        );
        assert_eq!(
            CallbackAction::parse("watchlist_view_PEPE"),
            Some(CallbackAction::ViewToken("PEPE".to_string()))
        );
        assert_eq!(
            CallbackAction::parse("remove_notification_DOGE"),
            Some(CallbackAction::RemoveNotification("DOGE".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        assert_eq!(CallbackAction::parse("network_btc"), None);
        assert_eq!(CallbackAction::parse("watchlist_last"), None);
        assert_eq!(CallbackAction::parse("refresh"), None);
    }

    #[test]
    fn test_page_turn_keeps_an_open_dialog() {
        let turned = State::BrowsingWatchlist { page: 2 };

        let awaiting_details = State::AwaitingNotificationDetails {
            symbol: "PEPE".to_string(),
        };
        assert_eq!(
            after_page_turn(Some(awaiting_details.clone()), turned.clone()),
            awaiting_details
        );
        let awaiting_address = State::AwaitingContractAddress {
            network: Network::Solana,
        };
        assert_eq!(
            after_page_turn(Some(awaiting_address.clone()), turned.clone()),
            awaiting_address
        );

        assert_eq!(
            after_page_turn(Some(State::BrowsingWatchlist { page: 1 }), turned.clone()),
            turned
        );
        assert_eq!(after_page_turn(Some(State::Start), turned.clone()), turned);
        assert_eq!(after_page_turn(None, turned.clone()), turned);
    }

    #[test]
    fn test_symbols_with_underscores_survive() {
        assert_eq!(
            CallbackAction::parse("remove_notification_MY_TOKEN"),
            Some(CallbackAction::RemoveNotification("MY_TOKEN".to_string()))
        );
    }
}
