use super::{command_list, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;

pub struct HelpCommand;

impl CommandHandler for HelpCommand {
    fn command_name() -> &'static str {
        "help"
    }

    fn description() -> &'static str {
        "display this help message"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        _services: Arc<ServiceContainer>,
    ) -> Result<()> {
        dialogue.update(State::Start).await?;

        bot.send_message(
            msg.chat.id,
            format!("Available commands:\n{}", command_list()),
        )
        .await?;

        Ok(())
    }
}
