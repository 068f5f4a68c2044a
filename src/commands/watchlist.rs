use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::{Network, State};
use crate::interactor::watchlist_interactor::WatchlistInteractorImpl;
use crate::presenter::watchlist_presenter::{WatchlistPresenter, WatchlistPresenterImpl};
use crate::view::watchlist_view::TelegramWatchlistView;

pub(crate) type TelegramWatchlistPresenter =
    WatchlistPresenterImpl<WatchlistInteractorImpl, TelegramWatchlistView>;

pub(crate) fn watchlist_presenter(
    bot: Bot,
    chat_id: ChatId,
    services: &ServiceContainer,
) -> TelegramWatchlistPresenter {
    let interactor = Arc::new(WatchlistInteractorImpl::new(
        services.db(),
        services.token_repository(),
        services.price_service(),
    ));
    let view = Arc::new(TelegramWatchlistView::new(bot, chat_id));
    WatchlistPresenterImpl::new(interactor, view)
}

pub struct AddTokenCommand;

impl CommandHandler for AddTokenCommand {
    fn command_name() -> &'static str {
        "addtoken"
    }

    fn description() -> &'static str {
        "add a token to the watchlist"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Add token command received from chat {}", msg.chat.id);

        let presenter = watchlist_presenter(bot, msg.chat.id, &services);
        let state = presenter.start_add_token().await?;
        dialogue.update(state).await?;

        Ok(())
    }
}

pub struct ViewWatchlistCommand;

impl CommandHandler for ViewWatchlistCommand {
    fn command_name() -> &'static str {
        "viewwatchlist"
    }

    fn description() -> &'static str {
        "browse the watchlist"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("View watchlist command received from chat {}", msg.chat.id);

        let presenter = watchlist_presenter(bot, msg.chat.id, &services);
        let state = presenter.show_watchlist().await?;
        dialogue.update(state).await?;

        Ok(())
    }
}

pub struct RemoveWatchlistCommand;

impl CommandHandler for RemoveWatchlistCommand {
    fn command_name() -> &'static str {
        "removewatchlist"
    }

    fn description() -> &'static str {
        "remove a token from the watchlist"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Remove watchlist command received from chat {}", msg.chat.id);

        let presenter = watchlist_presenter(bot, msg.chat.id, &services);
        let state = presenter.start_remove_token().await?;
        dialogue.update(state).await?;

        Ok(())
    }
}

// Handler for the contract address after a network was picked
pub async fn receive_contract_address(
    bot: Bot,
    msg: Message,
    network: Network,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let chat_id = msg.chat.id;

    let Some(token_address) = msg.text() else {
        bot.send_message(chat_id, "Please enter the token contract address as text.")
            .await?;
        return Ok(());
    };

    // the dialog ends whatever the lookup does
    dialogue.update(State::Start).await?;

    let presenter = watchlist_presenter(bot, chat_id, &services);
    let state = presenter.add_to_watchlist(network, token_address).await?;
    dialogue.update(state).await?;

    Ok(())
}

// Handler for the symbol to drop from the watchlist
pub async fn receive_removal_symbol(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let chat_id = msg.chat.id;

    let Some(symbol) = msg.text() else {
        bot.send_message(chat_id, "Please enter the token symbol as text.")
            .await?;
        return Ok(());
    };

    dialogue.update(State::Start).await?;

    let presenter = watchlist_presenter(bot, chat_id, &services);
    let state = presenter.remove_from_watchlist(symbol).await?;
    dialogue.update(state).await?;

    Ok(())
}
