//! `prefix`: lets users write `!echo` or `/echo` for `echo`.

use {
    async_trait::async_trait,
    superbot_common::Message,
    superbot_dispatch::{DispatcherBuilder, Middleware, Next, Plugin, ResponseProxy},
};

const DEFAULT_PREFIXES: &[char] = &['!', '/'];

pub struct PrefixPlugin {
    prefixes: Vec<char>,
}

impl Default for PrefixPlugin {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIXES.to_vec())
    }
}

impl PrefixPlugin {
    pub fn new(prefixes: Vec<char>) -> Self {
        Self { prefixes }
    }
}

impl Plugin for PrefixPlugin {
    fn name(&self) -> &str {
        "prefix"
    }

    fn init(&self, bot: &mut DispatcherBuilder) -> anyhow::Result<()> {
        bot.use_middleware(StripPrefix {
            prefixes: self.prefixes.clone(),
        });
        Ok(())
    }
}

struct StripPrefix {
    prefixes: Vec<char>,
}

#[async_trait]
impl Middleware for StripPrefix {
    fn name(&self) -> &str {
        "strip-prefix"
    }

    async fn handle(
        &self,
        proxy: ResponseProxy,
        mut message: Message,
        next: Next,
    ) -> anyhow::Result<()> {
        if let Some(rest) = message.text.strip_prefix(self.prefixes.as_slice()) {
            message.text = rest.to_string();
        }
        next.run(proxy, message).await
    }
}
