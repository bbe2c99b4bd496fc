//! Top-level serving handle.

use {superbot_common::Message, superbot_config::BotConfig};

use crate::{dispatcher::Dispatcher, error::Result, pipe::PipeOrchestrator};

/// The entry point transport adapters call.
///
/// Routes through a [`PipeOrchestrator`] when piping is enabled in the
/// config, otherwise straight to the [`Dispatcher`].
#[derive(Clone)]
pub struct Bot {
    dispatcher: Dispatcher,
    pipe: Option<PipeOrchestrator>,
}

impl Bot {
    pub fn new(dispatcher: Dispatcher, config: &BotConfig) -> Self {
        let pipe = config
            .enable_pipe
            .then(|| PipeOrchestrator::new(dispatcher.clone(), config.effective_delimiter()));
        Self { dispatcher, pipe }
    }

    /// Handle one inbound message.
    ///
    /// Resolves to a normalized reply, or to an error whose display text is
    /// safe to show to users.
    pub async fn receive(&self, message: Message) -> Result<Message> {
        match &self.pipe {
            Some(pipe) => pipe.receive(message).await,
            None => self.dispatcher.receive(message).await,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn pipe_enabled(&self) -> bool {
        self.pipe.is_some()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{commands::handler_fn, dispatcher::DispatcherBuilder};

    fn dispatcher() -> Dispatcher {
        let mut builder = DispatcherBuilder::new();
        builder
            .command(
                "echo",
                handler_fn(|proxy, message| async move {
                    proxy.respond(message.text);
                    Ok(())
                }),
            )
            .unwrap();
        builder
            .command(
                "upper",
                handler_fn(|proxy, message| async move {
                    proxy.respond(message.text.to_uppercase());
                    Ok(())
                }),
            )
            .unwrap();
        builder.build()
    }

    #[tokio::test]
    async fn pipe_disabled_passes_delimiter_through() {
        let bot = Bot::new(dispatcher(), &BotConfig::default());
        assert!(!bot.pipe_enabled());
        let reply = bot.receive(Message::new("echo hi | upper")).await.unwrap();
        assert_eq!(reply.text, "hi | upper");
    }

    #[tokio::test]
    async fn pipe_enabled_chains_commands() {
        let config = BotConfig {
            enable_pipe: true,
            ..BotConfig::default()
        };
        let bot = Bot::new(dispatcher(), &config);
        let reply = bot.receive(Message::new("echo hi | upper")).await.unwrap();
        assert_eq!(reply.text, "HI");
    }

    #[tokio::test]
    async fn configured_delimiter_is_used() {
        let config = BotConfig {
            enable_pipe: true,
            pipe_delimiter: ">".into(),
            ..BotConfig::default()
        };
        let bot = Bot::new(dispatcher(), &config);
        let reply = bot.receive(Message::new("echo a | b > upper")).await.unwrap();
        assert_eq!(reply.text, "A | B");
    }
}
