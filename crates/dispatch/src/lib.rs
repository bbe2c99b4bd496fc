//! Command dispatch: middleware, command resolution, response proxies, and
//! pipe chaining.
//!
//! Flow: inbound message → normalize attachments → middleware chain →
//! resolve command token → command handler (or raw middleware chain) →
//! proxy resolves → normalize attachments → outbound message.

pub mod bot;
pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod middleware;
pub mod pipe;
pub mod plugin;
pub mod proxy;

pub use {
    bot::Bot,
    commands::{CommandHandler, CommandTable, handler_fn},
    dispatcher::{Dispatcher, DispatcherBuilder},
    error::{Error, Result},
    middleware::{Endpoint, Middleware, MiddlewareChain, Next, middleware_fn},
    pipe::PipeOrchestrator,
    plugin::Plugin,
    proxy::ResponseProxy,
    superbot_common::Message,
};
