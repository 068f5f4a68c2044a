use anyhow::Result;
use std::sync::Arc;
use teloxide::{
    dispatching::dialogue::{Dialogue, InMemStorage},
    prelude::*,
    types::BotCommand,
};

use crate::di::ServiceContainer;
use crate::entity::State;

pub mod callback;
pub mod help;
pub mod notification;
pub mod start;
pub mod watchlist;

pub type MyDialogue = Dialogue<State, InMemStorage<State>>;

/// Trait that defines a command handler
pub trait CommandHandler {
    /// The command name in lowercase
    fn command_name() -> &'static str;

    /// The command description for help
    fn description() -> &'static str;

    /// Execute the command
    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        services: Arc<ServiceContainer>,
    ) -> Result<()>;
}

/// Register all command handlers in the command system
pub fn register_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            start::StartCommand::command_name(),
            start::StartCommand::description(),
        ),
        (
            help::HelpCommand::command_name(),
            help::HelpCommand::description(),
        ),
        (
            watchlist::AddTokenCommand::command_name(),
            watchlist::AddTokenCommand::description(),
        ),
        (
            notification::AddNotificationCommand::command_name(),
            notification::AddNotificationCommand::description(),
        ),
        (
            watchlist::ViewWatchlistCommand::command_name(),
            watchlist::ViewWatchlistCommand::description(),
        ),
        (
            notification::ViewNotificationsCommand::command_name(),
            notification::ViewNotificationsCommand::description(),
        ),
        (
            watchlist::RemoveWatchlistCommand::command_name(),
            watchlist::RemoveWatchlistCommand::description(),
        ),
        (
            notification::RemoveNotificationCommand::command_name(),
            notification::RemoveNotificationCommand::description(),
        ),
    ]
}

/// Command menu shown by Telegram clients
pub fn menu_commands() -> Vec<BotCommand> {
    register_commands()
        .into_iter()
        .map(|(name, description)| BotCommand::new(name, description))
        .collect()
}

/// Text listing every command, one per line
pub fn command_list() -> String {
    register_commands()
        .into_iter()
        .map(|(name, description)| format!("/{} - {}", name, description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bot Commands enum for teloxide command filter
#[derive(teloxide::utils::command::BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum BotCommands {
    #[command(description = "start the bot and show the command list")]
    Start,
    #[command(description = "display this help message")]
    Help,
    #[command(description = "add a token to the watchlist")]
    AddToken,
    #[command(description = "set a price change notification")]
    AddNotification,
    #[command(description = "browse the watchlist")]
    ViewWatchlist,
    #[command(description = "list your notifications")]
    ViewNotifications,
    #[command(description = "remove a token from the watchlist")]
    RemoveWatchlist,
    #[command(description = "remove one of your notifications")]
    RemoveNotification,
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::utils::command::BotCommands as _;

    #[test]
    fn test_registered_commands_match_the_filter() {
        let names: Vec<&str> = register_commands().iter().map(|(name, _)| *name).collect();

        assert_eq!(
            names,
            vec![
                "start",
                "help",
                "addtoken",
                "addnotification",
                "viewwatchlist",
                "viewnotifications",
                "removewatchlist",
                "removenotification",
            ]
        );

        for name in names {
            let text = format!("/{}", name);
            assert!(
                BotCommands::parse(&text, "").is_ok(),
                "{} is not understood by the command filter",
                text
            );
        }
    }

    #[test]
    fn test_command_list_has_one_line_per_command() {
        let list = command_list();

        assert_eq!(list.lines().count(), 8);
        assert!(list.starts_with("/start - "));
        assert!(list.contains("/removenotification - remove one of your notifications"));
    }
}
