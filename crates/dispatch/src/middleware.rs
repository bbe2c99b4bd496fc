//! Ordered middleware with explicit continue/short-circuit control.
//!
//! Each step receives the proxy, the message, and a [`Next`] continuation.
//! Calling [`Next::run`] hands the message to the following step, or to the
//! chain's [`Endpoint`] after the last one. Returning without calling it
//! short-circuits the chain.

use std::{future::Future, sync::Arc};

use {
    anyhow::Result,
    async_trait::async_trait,
    futures::future::BoxFuture,
    superbot_common::Message,
};

use crate::proxy::ResponseProxy;

// ── Step and terminal traits ────────────────────────────────────────────────

#[async_trait]
pub trait Middleware: Send + Sync {
    /// A human-readable name, used in logs.
    fn name(&self) -> &str {
        "middleware"
    }

    async fn handle(&self, proxy: ResponseProxy, message: Message, next: Next) -> Result<()>;
}

/// What runs once every step of a chain has continued.
#[async_trait]
pub trait Endpoint: Send + Sync {
    async fn call(&self, proxy: ResponseProxy, message: Message) -> Result<()>;
}

// ── Continuation ────────────────────────────────────────────────────────────

type Steps = Arc<Vec<Arc<dyn Middleware>>>;

/// Continuation into the remainder of a chain.
///
/// `run` consumes the continuation, so every step executes at most once per
/// chain run.
pub struct Next {
    steps: Steps,
    index: usize,
    endpoint: Arc<dyn Endpoint>,
}

impl Next {
    pub fn run(self, proxy: ResponseProxy, message: Message) -> BoxFuture<'static, Result<()>> {
        Box::pin(async move {
            let Some(step) = self.steps.get(self.index).cloned() else {
                return self.endpoint.call(proxy, message).await;
            };
            let next = Self {
                steps: Arc::clone(&self.steps),
                index: self.index + 1,
                endpoint: Arc::clone(&self.endpoint),
            };
            step.handle(proxy, message, next).await
        })
    }

    /// Steps left before the endpoint.
    pub fn remaining(&self) -> usize {
        self.steps.len().saturating_sub(self.index)
    }
}

// ── Chain ───────────────────────────────────────────────────────────────────

/// Append-only list of middleware steps, run in registration order.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    steps: Steps,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Arc<dyn Middleware>) {
        Arc::make_mut(&mut self.steps).push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run the chain from its first step, ending in `endpoint`.
    ///
    /// The returned future owns everything it needs, so it can be spawned.
    pub fn run(
        &self,
        proxy: ResponseProxy,
        message: Message,
        endpoint: Arc<dyn Endpoint>,
    ) -> BoxFuture<'static, Result<()>> {
        let next = Next {
            steps: Arc::clone(&self.steps),
            index: 0,
            endpoint,
        };
        next.run(proxy, message)
    }
}

// ── Closure adapter ─────────────────────────────────────────────────────────

/// Middleware backed by an async closure.
pub struct FnMiddleware<F> {
    name: String,
    f: F,
}

/// Build a middleware step from an async closure.
pub fn middleware_fn<F, Fut>(name: impl Into<String>, f: F) -> FnMiddleware<F>
where
    F: Fn(ResponseProxy, Message, Next) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    FnMiddleware {
        name: name.into(),
        f,
    }
}

#[async_trait]
impl<F, Fut> Middleware for FnMiddleware<F>
where
    F: Fn(ResponseProxy, Message, Next) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, proxy: ResponseProxy, message: Message, next: Next) -> Result<()> {
        (self.f)(proxy, message, next).await
    }
}
