//! `greet`: a templated greeting.

use {
    async_trait::async_trait,
    superbot_common::{Message, text},
    superbot_dispatch::{CommandHandler, DispatcherBuilder, Plugin, ResponseProxy},
};

const TEMPLATE: &str = "Hello, {0}!";
const NOBODY: &str = "stranger";

pub struct GreetPlugin;

impl Plugin for GreetPlugin {
    fn name(&self) -> &str {
        "greet"
    }

    fn init(&self, bot: &mut DispatcherBuilder) -> anyhow::Result<()> {
        bot.command("greet", Greet)?;
        Ok(())
    }
}

struct Greet;

#[async_trait]
impl CommandHandler for Greet {
    async fn handle(&self, proxy: ResponseProxy, message: Message) -> anyhow::Result<()> {
        let who = match message.text.trim() {
            "" => NOBODY,
            name => name,
        };
        proxy.respond(text::format_positional(TEMPLATE, &[who]));
        Ok(())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn greets_by_name_or_default() {
        let mut builder = DispatcherBuilder::new();
        builder.install(&GreetPlugin).unwrap();
        let bot = builder.build();

        let reply = bot.receive(Message::new("greet Ada")).await.unwrap();
        assert_eq!(reply.text, "Hello, Ada!");
        let reply = bot.receive(Message::new("greet")).await.unwrap();
        assert_eq!(reply.text, "Hello, stranger!");
    }
}
