//! Per-message response handle.

use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex},
    task::{Context, Poll},
};

use {superbot_common::Message, tokio::sync::oneshot, tracing::debug};

use crate::{
    commands::CommandTable,
    error::{Error, Result},
};

type Slot = Arc<Mutex<Option<oneshot::Sender<Message>>>>;

/// Handle through which middleware and command handlers answer a message.
///
/// Every clone or [`fork`](Self::fork) shares one resolution cell: the first
/// `respond`/`error` wins and later calls are ignored. A proxy lives for a
/// single `receive` call.
#[derive(Clone)]
pub struct ResponseProxy {
    slot: Slot,
    commands: Arc<CommandTable>,
}

/// Receiving side of a [`ResponseProxy`].
///
/// Resolves with the first reply, or with [`Error::NoResponse`] once every
/// handle is dropped.
pub(crate) struct Pending {
    rx: oneshot::Receiver<Message>,
}

impl ResponseProxy {
    pub(crate) fn channel(commands: Arc<CommandTable>) -> (Self, Pending) {
        let (tx, rx) = oneshot::channel();
        let proxy = Self {
            slot: Arc::new(Mutex::new(Some(tx))),
            commands,
        };
        (proxy, Pending { rx })
    }

    /// Resolve with a reply. Returns `false` if the message was already
    /// answered.
    pub fn respond(&self, reply: impl Into<Message>) -> bool {
        let sender = self.slot.lock().unwrap_or_else(|e| e.into_inner()).take();
        match sender {
            Some(tx) => {
                // The receiver may be gone if dispatch already failed.
                let _ = tx.send(reply.into());
                true
            },
            None => {
                debug!("response already sent, ignoring");
                false
            },
        }
    }

    /// Resolve with a user-facing error text. This is a normal reply, not
    /// a dispatch fault.
    pub fn error(&self, text: impl Into<String>) -> bool {
        self.respond(Message::new(text))
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).is_none()
    }

    /// Registered command names in registration order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.names().collect()
    }

    /// A new handle bound to the same resolution cell.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
            commands: Arc::clone(&self.commands),
        }
    }
}

impl Future for Pending {
    type Output = Result<Message>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|sent| sent.map_err(|_| Error::NoResponse))
    }
}

impl Pending {
    /// A reply that was already sent, if any.
    pub(crate) fn try_take(&mut self) -> Option<Message> {
        self.rx.try_recv().ok()
    }
}
