//! `echo`: replies with its arguments and attachments unchanged.

use {
    async_trait::async_trait,
    superbot_common::Message,
    superbot_dispatch::{CommandHandler, DispatcherBuilder, Plugin, ResponseProxy},
};

pub struct EchoPlugin;

impl Plugin for EchoPlugin {
    fn name(&self) -> &str {
        "echo"
    }

    fn init(&self, bot: &mut DispatcherBuilder) -> anyhow::Result<()> {
        bot.command("echo", Echo)?;
        Ok(())
    }
}

struct Echo;

#[async_trait]
impl CommandHandler for Echo {
    async fn handle(&self, proxy: ResponseProxy, message: Message) -> anyhow::Result<()> {
        let mut reply = Message::new(message.text);
        reply.attachments = message.attachments;
        proxy.respond(reply);
        Ok(())
    }
}
