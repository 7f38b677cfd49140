//! # Task Inbox
//!
//! Defines the receiving side of the task bus.

use crate::publisher::{InboxMap, InboxRegistry};
use shared_types::{OutgoingMessage, TaskId};
use std::pin::Pin;
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from inbox operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InboxError {
    /// The bus was dropped or the inbox was replaced.
    #[error("Inbox closed")]
    Closed,
}

/// The inbox of one task.
///
/// When dropped, the task is unregistered from the bus.
pub struct TaskInbox {
    /// The owning task.
    task: TaskId,

    /// The receiving half of the task channel.
    receiver: mpsc::UnboundedReceiver<OutgoingMessage>,

    /// Reference to the bus registry (for cleanup). Weak so that dropping
    /// the bus closes every inbox.
    registry: Weak<InboxMap>,

    /// Registration generation of this inbox.
    generation: u64,
}

impl TaskInbox {
    pub(crate) fn new(
        task: TaskId,
        receiver: mpsc::UnboundedReceiver<OutgoingMessage>,
        registry: &InboxRegistry,
        generation: u64,
    ) -> Self {
        Self {
            task,
            receiver,
            registry: Arc::downgrade(registry),
            generation,
        }
    }

    /// Receive the next message.
    ///
    /// # Returns
    ///
    /// - `Some(message)` - The next message in arrival order
    /// - `None` - The channel was closed (bus dropped or inbox replaced)
    pub async fn recv(&mut self) -> Option<OutgoingMessage> {
        self.receiver.recv().await
    }

    /// Try to receive the next message without waiting.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(message))` - A message was available
    /// - `Ok(None)` - The inbox is empty
    /// - `Err(InboxError::Closed)` - The channel was closed
    pub fn try_recv(&mut self) -> Result<Option<OutgoingMessage>, InboxError> {
        match self.receiver.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(InboxError::Closed),
        }
    }

    /// The task owning this inbox.
    #[must_use]
    pub fn task(&self) -> TaskId {
        self.task
    }

    /// Convert into a `Stream` of messages.
    #[must_use]
    pub fn into_stream(self) -> InboxStream {
        InboxStream { inbox: self }
    }
}

impl Drop for TaskInbox {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut inboxes = registry.write();
        let registered_here = inboxes
            .get(&self.task)
            .is_some_and(|(generation, _)| *generation == self.generation);

        if registered_here {
            inboxes.remove(&self.task);
        }
        debug!(task = %self.task, "Inbox dropped");
    }
}

/// A stream wrapper for inboxes.
///
/// Implements `tokio_stream::Stream` for use with stream combinators.
pub struct InboxStream {
    inbox: TaskInbox,
}

impl InboxStream {
    /// The task owning the underlying inbox.
    #[must_use]
    pub fn task(&self) -> TaskId {
        self.inbox.task
    }
}

impl Stream for InboxStream {
    type Item = OutgoingMessage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inbox.receiver.poll_recv(cx)
    }
}
