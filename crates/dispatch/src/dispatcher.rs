//! Command resolution and dispatch.

use std::{panic::AssertUnwindSafe, sync::Arc, thread};

use {
    async_trait::async_trait,
    futures::{
        FutureExt,
        future::{self, Either},
    },
    superbot_common::{Message, text},
    tracing::{debug, error, warn},
};

use crate::{
    commands::{CommandHandler, CommandTable, ListCommands},
    error::{Error, NOT_UNDERSTOOD, Result, not_recognized},
    middleware::{Endpoint, Middleware, MiddlewareChain},
    plugin::Plugin,
    proxy::ResponseProxy,
};

/// Name of the built-in command that lists all commands.
pub const LIST_COMMAND: &str = "all";

// ── Setup ───────────────────────────────────────────────────────────────────

/// Setup phase of a [`Dispatcher`]: commands and middleware are registered
/// here, then frozen by [`build`](Self::build).
pub struct DispatcherBuilder {
    middleware: MiddlewareChain,
    raw: MiddlewareChain,
    commands: CommandTable,
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatcherBuilder {
    /// A builder with the built-in `all` command installed.
    pub fn new() -> Self {
        let mut commands = CommandTable::new();
        if let Err(e) = commands.register(LIST_COMMAND, Arc::new(ListCommands)) {
            // Only reachable if the table was not empty.
            warn!(error = %e, "built-in command not installed");
        }
        Self {
            middleware: MiddlewareChain::new(),
            raw: MiddlewareChain::new(),
            commands,
        }
    }

    /// Append a step to the main chain, which runs for every message.
    pub fn use_middleware(&mut self, step: impl Middleware + 'static) -> &mut Self {
        debug!(step = step.name(), "middleware registered");
        self.middleware.push(Arc::new(step));
        self
    }

    /// Append a step to the raw chain, which runs only when no command
    /// matches.
    pub fn raw(&mut self, step: impl Middleware + 'static) -> &mut Self {
        debug!(step = step.name(), "raw middleware registered");
        self.raw.push(Arc::new(step));
        self
    }

    /// Register a command. Names are case-insensitive and must be unique.
    pub fn command(
        &mut self,
        name: &str,
        handler: impl CommandHandler + 'static,
    ) -> Result<&mut Self> {
        self.commands.register(name, Arc::new(handler))?;
        debug!(command = %name.to_lowercase(), "command registered");
        Ok(self)
    }

    /// Run a plugin's initialization against this builder.
    ///
    /// Panics are caught and reported as errors, so one broken plugin
    /// cannot take down setup.
    pub fn install(&mut self, plugin: &dyn Plugin) -> anyhow::Result<()> {
        match std::panic::catch_unwind(AssertUnwindSafe(|| plugin.init(self))) {
            Ok(result) => result,
            Err(_) => anyhow::bail!("plugin {} panicked during init", plugin.name()),
        }
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Freeze the tables into a servable dispatcher.
    pub fn build(self) -> Dispatcher {
        let commands = Arc::new(self.commands);
        let resolve = Resolve {
            commands: Arc::clone(&commands),
            raw: self.raw,
        };
        Dispatcher {
            inner: Arc::new(Inner {
                middleware: self.middleware,
                commands,
                resolve: Arc::new(resolve),
            }),
        }
    }
}

// ── Serving ─────────────────────────────────────────────────────────────────

struct Inner {
    middleware: MiddlewareChain,
    commands: Arc<CommandTable>,
    resolve: Arc<dyn Endpoint>,
}

/// Frozen command and middleware tables plus the `receive` entry point.
///
/// Cheap to clone; concurrent `receive` calls share only read-only state.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

impl Dispatcher {
    /// Dispatch one message and wait for its reply.
    ///
    /// Returns as soon as any handle responds. Work a handler still has to
    /// do after responding finishes in a background task.
    ///
    /// Errors are limited to [`Error::Failed`] (a handler or step failed
    /// before anything was sent) and [`Error::NoResponse`].
    pub async fn receive(&self, mut message: Message) -> Result<Message> {
        message.normalize_incoming();

        let (proxy, pending) = ResponseProxy::channel(Arc::clone(&self.inner.commands));
        let run = AssertUnwindSafe(self.inner.middleware.run(
            proxy,
            message,
            Arc::clone(&self.inner.resolve),
        ))
        .catch_unwind();

        let mut reply = match future::select(pending, run).await {
            Either::Left((Ok(reply), rest)) => {
                tokio::spawn(async move {
                    if check(rest.await).is_err() {
                        debug!("fault after the reply was sent");
                    }
                });
                reply
            },
            Either::Left((Err(no_response), rest)) => {
                // Every handle is gone, so the chain's outcome decides the error.
                check(rest.await)?;
                return Err(no_response);
            },
            Either::Right((finished, mut pending)) => match check(finished) {
                Ok(()) => pending.await?,
                // A reply sent before the fault still wins.
                Err(e) => pending.try_take().ok_or(e)?,
            },
        };

        reply.normalize_outgoing();
        Ok(reply)
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.inner.commands.names().collect()
    }
}

/// Log a chain fault and map it to [`Error::Failed`].
fn check(finished: thread::Result<anyhow::Result<()>>) -> Result<()> {
    match finished {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            warn!(error = %e, "message dispatch failed");
            Err(Error::Failed)
        },
        Err(_) => {
            error!("message dispatch panicked");
            Err(Error::Failed)
        },
    }
}

// ── Terminal behaviour ──────────────────────────────────────────────────────

/// End of the main chain: resolve the command token.
struct Resolve {
    commands: Arc<CommandTable>,
    raw: MiddlewareChain,
}

#[async_trait]
impl Endpoint for Resolve {
    async fn call(&self, proxy: ResponseProxy, mut message: Message) -> anyhow::Result<()> {
        let proxy = proxy.fork();
        let (head, rest) = text::parse(&message.text);
        let head = head.to_lowercase();
        if head.trim().is_empty() {
            proxy.error(NOT_UNDERSTOOD);
            return Ok(());
        }
        let rest = rest.to_string();

        match self.commands.get(&head) {
            Some(handler) => {
                debug!(command = %head, "dispatching command");
                let handler = Arc::clone(handler);
                message.full_text = Some(std::mem::replace(&mut message.text, rest));
                message.command = Some(head);
                handler.handle(proxy, message).await
            },
            None => {
                debug!(token = %head, "no command matched, running raw middleware");
                let unrecognized = Arc::new(Unrecognized { token: head });
                self.raw.run(proxy, message, unrecognized).await
            },
        }
    }
}

/// End of the raw chain: nothing handled the message.
struct Unrecognized {
    token: String,
}

#[async_trait]
impl Endpoint for Unrecognized {
    async fn call(&self, proxy: ResponseProxy, _message: Message) -> anyhow::Result<()> {
        proxy.error(not_recognized(&self.token));
        Ok(())
    }
}
