//! `reverse`: reverses its arguments character by character.

use {
    async_trait::async_trait,
    superbot_common::Message,
    superbot_dispatch::{CommandHandler, DispatcherBuilder, Plugin, ResponseProxy},
};

pub struct ReversePlugin;

impl Plugin for ReversePlugin {
    fn name(&self) -> &str {
        "reverse"
    }

    fn init(&self, bot: &mut DispatcherBuilder) -> anyhow::Result<()> {
        bot.command("reverse", Reverse)?;
        Ok(())
    }
}

struct Reverse;

#[async_trait]
impl CommandHandler for Reverse {
    async fn handle(&self, proxy: ResponseProxy, message: Message) -> anyhow::Result<()> {
        proxy.respond(message.text.chars().rev().collect::<String>());
        Ok(())
    }
}
