use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::{prelude::*, types::ParseMode};

use super::{command_list, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;

pub struct StartCommand;

impl CommandHandler for StartCommand {
    fn command_name() -> &'static str {
        "start"
    }

    fn description() -> &'static str {
        "start the bot and show the command list"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        _services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Start command received from chat {}", msg.chat.id);

        // any abandoned dialog ends here
        dialogue.update(State::Start).await?;

        bot.send_message(
            msg.chat.id,
            format!(
                "<b>👋 Welcome to the Token Watch Bot!</b>\n\n\
                Track token prices and get notified when they move.\n\n{}",
                command_list()
            ),
        )
        .parse_mode(ParseMode::Html)
        .await?;

        Ok(())
    }
}
