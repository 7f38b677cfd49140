//! # Message Poster
//!
//! Defines the posting side of the task bus.

use crate::subscriber::TaskInbox;
use parking_lot::RwLock;
use shared_types::{OutgoingMessage, TaskId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// Registered inbox senders, keyed by task, tagged with a registration
/// generation so a stale inbox cannot unregister its replacement.
pub(crate) type InboxMap = RwLock<HashMap<TaskId, (u64, mpsc::UnboundedSender<OutgoingMessage>)>>;
pub(crate) type InboxRegistry = Arc<InboxMap>;

/// Capability to hand a message to the substrate for delivery.
///
/// Implementations must be callable concurrently from any thread, including
/// threads that are not driven by an async runtime.
pub trait MessagePoster: Send + Sync {
    /// Enqueue `message` for the inbox of `destination`.
    ///
    /// Fire-and-forget: never blocks and reports nothing back.
    fn post_message(&self, destination: TaskId, message: OutgoingMessage);

    /// Total number of messages handed to this poster.
    fn messages_posted(&self) -> u64;
}

impl<P: MessagePoster + ?Sized> MessagePoster for Arc<P> {
    fn post_message(&self, destination: TaskId, message: OutgoingMessage) {
        (**self).post_message(destination, message);
    }

    fn messages_posted(&self) -> u64 {
        (**self).messages_posted()
    }
}

/// In-memory implementation of the task bus.
///
/// Uses one unbounded `tokio::sync::mpsc` channel per task, so posting never
/// waits and messages from a single source keep their order.
pub struct InMemoryTaskBus {
    /// Inbox senders by task.
    inboxes: InboxRegistry,

    /// Source of registration generations.
    next_generation: AtomicU64,

    /// Total messages posted.
    messages_posted: AtomicU64,

    /// Messages dropped because the destination had no inbox.
    dead_letters: AtomicU64,
}

impl InMemoryTaskBus {
    /// Create an empty bus with no registered tasks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inboxes: Arc::new(RwLock::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
            messages_posted: AtomicU64::new(0),
            dead_letters: AtomicU64::new(0),
        }
    }

    /// Register the inbox for `task`.
    ///
    /// Registering a task twice replaces the earlier inbox; the earlier
    /// receiver sees its channel close once drained.
    #[must_use]
    pub fn register_task(&self, task: TaskId) -> TaskInbox {
        let (sender, receiver) = mpsc::unbounded_channel();
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        if self
            .inboxes
            .write()
            .insert(task, (generation, sender))
            .is_some()
        {
            warn!(task = %task, "Inbox already registered, replacing");
        }

        debug!(task = %task, "Inbox registered");

        TaskInbox::new(task, receiver, &self.inboxes, generation)
    }

    /// Whether `task` currently has an inbox.
    #[must_use]
    pub fn is_registered(&self, task: TaskId) -> bool {
        self.inboxes.read().contains_key(&task)
    }

    /// Number of messages dropped for lack of an inbox.
    #[must_use]
    pub fn dead_letters(&self) -> u64 {
        self.dead_letters.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryTaskBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MessagePoster for InMemoryTaskBus {
    fn post_message(&self, destination: TaskId, message: OutgoingMessage) {
        let kind = message.payload.kind();
        let source = message.source;

        // Always increment counter (delivery was attempted)
        self.messages_posted.fetch_add(1, Ordering::Relaxed);

        let delivered = match self.inboxes.read().get(&destination) {
            Some((_, sender)) => sender.send(message).is_ok(),
            None => false,
        };

        if delivered {
            debug!(
                source = %source,
                destination = %destination,
                kind = ?kind,
                "Message posted"
            );
            return;
        }

        self.dead_letters.fetch_add(1, Ordering::Relaxed);
        error!(
            source = %source,
            destination = %destination,
            kind = ?kind,
            "Message dead-lettered (no inbox)"
        );
    }

    fn messages_posted(&self) -> u64 {
        self.messages_posted.load(Ordering::Relaxed)
    }
}
