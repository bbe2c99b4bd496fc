//! Command table: lower-cased command name → handler.

use std::{collections::HashMap, future::Future, sync::Arc};

use {anyhow::Result, async_trait::async_trait, superbot_common::Message};

use crate::{error::Error, proxy::ResponseProxy};

/// Handles one command. `message.text` holds the arguments, with the command
/// token already stripped.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, proxy: ResponseProxy, message: Message) -> Result<()>;
}

/// Registered commands, keyed by lower-cased name.
///
/// Filled during setup and read-only once the dispatcher is built.
#[derive(Default)]
pub struct CommandTable {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
    order: Vec<String>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, case-insensitively.
    pub fn register(
        &mut self,
        name: &str,
        handler: Arc<dyn CommandHandler>,
    ) -> crate::Result<()> {
        let key = name.to_lowercase();
        if self.handlers.contains_key(&key) {
            return Err(Error::duplicate_command(key));
        }
        self.order.push(key.clone());
        self.handlers.insert(key, handler);
        Ok(())
    }

    /// Look up an already lower-cased command name.
    pub fn get(&self, key: &str) -> Option<&Arc<dyn CommandHandler>> {
        self.handlers.get(key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(&name.to_lowercase())
    }

    /// Command names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ── Closure adapter ─────────────────────────────────────────────────────────

/// Command handler backed by an async closure.
pub struct FnHandler<F> {
    f: F,
}

/// Build a command handler from an async closure.
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(ResponseProxy, Message) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    FnHandler { f }
}

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(ResponseProxy, Message) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    async fn handle(&self, proxy: ResponseProxy, message: Message) -> Result<()> {
        (self.f)(proxy, message).await
    }
}

/// Built-in `all` command: lists every registered command name.
pub(crate) struct ListCommands;

#[async_trait]
impl CommandHandler for ListCommands {
    async fn handle(&self, proxy: ResponseProxy, _message: Message) -> Result<()> {
        let names = proxy.command_names().join(", ");
        proxy.respond(names);
        Ok(())
    }
}
