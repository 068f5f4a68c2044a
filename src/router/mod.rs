use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use teloxide::{dispatching::dialogue::InMemStorage, dispatching::UpdateHandler, prelude::*};

use crate::commands::{
    self, callback::handle_callback, BotCommands, CommandHandler, MyDialogue,
};
use crate::di::ServiceContainer;
use crate::entity::{Network, State};

// Base router trait
#[async_trait]
pub trait Router: Send + Sync {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error>;
}

// Command router implementation
pub struct TelegramRouter {
    services: Arc<ServiceContainer>,
}

impl TelegramRouter {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

macro_rules! command_endpoint {
    ($services:expr, $command:ty) => {{
        let services = $services.clone();
        move |bot: Bot, msg: Message, dialogue: MyDialogue| {
            let services = services.clone();
            async move { <$command>::execute(bot, msg, dialogue, services).await }
        }
    }};
}

#[async_trait]
impl Router for TelegramRouter {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error> {
        use dptree::case;
        use teloxide::dispatching::UpdateFilterExt;

        let services = &self.services;

        // Commands win over any dialog step, so a command always restarts the conversation
        let command_handler = teloxide::filter_command::<BotCommands, _>()
            .branch(
                case![BotCommands::Start]
                    .endpoint(command_endpoint!(services, commands::start::StartCommand)),
            )
            .branch(
                case![BotCommands::Help]
                    .endpoint(command_endpoint!(services, commands::help::HelpCommand)),
            )
            .branch(case![BotCommands::AddToken].endpoint(command_endpoint!(
                services,
                commands::watchlist::AddTokenCommand
            )))
            .branch(case![BotCommands::AddNotification].endpoint(command_endpoint!(
                services,
                commands::notification::AddNotificationCommand
            )))
            .branch(case![BotCommands::ViewWatchlist].endpoint(command_endpoint!(
                services,
                commands::watchlist::ViewWatchlistCommand
            )))
            .branch(case![BotCommands::ViewNotifications].endpoint(command_endpoint!(
                services,
                commands::notification::ViewNotificationsCommand
            )))
            .branch(case![BotCommands::RemoveWatchlist].endpoint(command_endpoint!(
                services,
                commands::watchlist::RemoveWatchlistCommand
            )))
            .branch(case![BotCommands::RemoveNotification].endpoint(command_endpoint!(
                services,
                commands::notification::RemoveNotificationCommand
            )));

        let services_for_address = self.services.clone();
        let services_for_symbol = self.services.clone();
        let services_for_details = self.services.clone();
        let services_for_removal = self.services.clone();

        let dialog_handler = dptree::entry()
            .branch(case![State::AwaitingContractAddress { network }].endpoint(
                move |bot: Bot, msg: Message, network: Network, dialogue: MyDialogue| {
                    let services = services_for_address.clone();
                    async move {
                        commands::watchlist::receive_contract_address(
                            bot, msg, network, dialogue, services,
                        )
                        .await
                    }
                },
            ))
            .branch(case![State::AwaitingNotificationSymbol].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_symbol.clone();
                    async move {
                        commands::notification::receive_notification_symbol(
                            bot, msg, dialogue, services,
                        )
                        .await
                    }
                },
            ))
            .branch(case![State::AwaitingNotificationDetails { symbol }].endpoint(
                move |bot: Bot, msg: Message, symbol: String, dialogue: MyDialogue| {
                    let services = services_for_details.clone();
                    async move {
                        commands::notification::receive_notification_details(
                            bot, msg, symbol, dialogue, services,
                        )
                        .await
                    }
                },
            ))
            .branch(case![State::AwaitingRemovalSymbol].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_removal.clone();
                    async move {
                        commands::watchlist::receive_removal_symbol(bot, msg, dialogue, services)
                            .await
                    }
                },
            ));

        // idle chats, and chats waiting on a button, do not route free text anywhere
        let ignored_handler = dptree::endpoint(|msg: Message| async move {
            debug!("Ignoring message from chat {} outside a dialog", msg.chat.id);
            Ok::<(), anyhow::Error>(())
        });

        let message_handler = Update::filter_message()
            .branch(command_handler)
            .branch(dialog_handler)
            .branch(ignored_handler);

        let services_for_callbacks = self.services.clone();

        // Add callback query handler for our buttons
        let callback_handler = Update::filter_callback_query().endpoint(
            move |bot: Bot, q: CallbackQuery, dialogue: MyDialogue| {
                let services = services_for_callbacks.clone();
                async move { handle_callback(bot, q, dialogue, services).await }
            },
        );

        teloxide::dispatching::dialogue::enter::<Update, InMemStorage<State>, State, _>()
            .branch(message_handler)
            .branch(callback_handler)
    }
}
