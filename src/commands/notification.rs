use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::interactor::notification_interactor::NotificationInteractorImpl;
use crate::presenter::notification_presenter::{
    NotificationPresenter, NotificationPresenterImpl,
};
use crate::view::notification_view::TelegramNotificationView;

pub(crate) type TelegramNotificationPresenter =
    NotificationPresenterImpl<NotificationInteractorImpl, TelegramNotificationView>;

pub(crate) fn notification_presenter(
    bot: Bot,
    chat_id: ChatId,
    services: &ServiceContainer,
) -> TelegramNotificationPresenter {
    let interactor = Arc::new(NotificationInteractorImpl::new(services.db()));
    let view = Arc::new(TelegramNotificationView::new(bot, chat_id));
    NotificationPresenterImpl::new(interactor, view)
}

pub struct AddNotificationCommand;

impl CommandHandler for AddNotificationCommand {
    fn command_name() -> &'static str {
        "addnotification"
    }

    fn description() -> &'static str {
        "set a price change notification"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Add notification command received from chat {}", msg.chat.id);

        let presenter = notification_presenter(bot, msg.chat.id, &services);
        let state = presenter.start_add_notification().await?;
        dialogue.update(state).await?;

        Ok(())
    }
}

pub struct ViewNotificationsCommand;

impl CommandHandler for ViewNotificationsCommand {
    fn command_name() -> &'static str {
        "viewnotifications"
    }

    fn description() -> &'static str {
        "list your notifications"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        dialogue.update(State::Start).await?;

        let presenter = notification_presenter(bot, msg.chat.id, &services);
        presenter.show_notifications(msg.chat.id.0).await?;

        Ok(())
    }
}

pub struct RemoveNotificationCommand;

impl CommandHandler for RemoveNotificationCommand {
    fn command_name() -> &'static str {
        "removenotification"
    }

    fn description() -> &'static str {
        "remove one of your notifications"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        // the removal is a single button round-trip, no dialog state
        dialogue.update(State::Start).await?;

        let presenter = notification_presenter(bot, msg.chat.id, &services);
        presenter.show_removal_options(msg.chat.id.0).await?;

        Ok(())
    }
}

// Handler for the symbol a new notification is for
pub async fn receive_notification_symbol(
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

    let presenter = notification_presenter(bot, chat_id, &services);
    let state = presenter.select_symbol(symbol).await?;
    dialogue.update(state).await?;

    Ok(())
}

// Handler for the `up|down <n>%` details of a notification
pub async fn receive_notification_details(
    bot: Bot,
    msg: Message,
    symbol: String,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let chat_id = msg.chat.id;

    let Some(details) = msg.text() else {
        bot.send_message(chat_id, "Please enter the details as text, e.g. 'up 10%'.")
            .await?;
        return Ok(());
    };

    dialogue.update(State::Start).await?;

    let presenter = notification_presenter(bot, chat_id, &services);
    let state = presenter
        .set_notification(chat_id.0, &symbol, details)
        .await?;
    dialogue.update(state).await?;

    Ok(())
}
