//! `upper` and `lower`: change the case of their arguments.

use {
    async_trait::async_trait,
    superbot_common::Message,
    superbot_dispatch::{CommandHandler, DispatcherBuilder, Plugin, ResponseProxy},
};

pub struct UpperPlugin;

pub struct LowerPlugin;

impl Plugin for UpperPlugin {
    fn name(&self) -> &str {
        "upper"
    }

    fn init(&self, bot: &mut DispatcherBuilder) -> anyhow::Result<()> {
        bot.command("upper", Case::Upper)?;
        Ok(())
    }
}

impl Plugin for LowerPlugin {
    fn name(&self) -> &str {
        "lower"
    }

    fn init(&self, bot: &mut DispatcherBuilder) -> anyhow::Result<()> {
        bot.command("lower", Case::Lower)?;
        Ok(())
    }
}

enum Case {
    Upper,
    Lower,
}

#[async_trait]
impl CommandHandler for Case {
    async fn handle(&self, proxy: ResponseProxy, message: Message) -> anyhow::Result<()> {
        let text = match self {
            Self::Upper => message.text.to_uppercase(),
            Self::Lower => message.text.to_lowercase(),
        };
        proxy.respond(text);
        Ok(())
    }
}
