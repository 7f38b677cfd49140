//! # Recording Poster
//!
//! An in-memory `MessagePoster` that keeps every posted message, used as a
//! stand-in for the task bus when testing producers.

use crate::publisher::MessagePoster;
use parking_lot::Mutex;
use shared_types::{OutgoingMessage, TaskId};
use std::time::Duration;
use tokio::sync::Notify;

/// Captures `(destination, message)` pairs in posting order.
#[derive(Default)]
pub struct RecordingPoster {
    posted: Mutex<Vec<(TaskId, OutgoingMessage)>>,
    notify: Notify,
}

impl RecordingPoster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything posted so far.
    #[must_use]
    pub fn messages(&self) -> Vec<(TaskId, OutgoingMessage)> {
        self.posted.lock().clone()
    }

    /// Number of messages posted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.posted.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait until at least `count` messages were posted.
    ///
    /// Returns `false` if `limit` elapsed first.
    pub async fn wait_for(&self, count: usize, limit: Duration) -> bool {
        tokio::time::timeout(limit, async {
            loop {
                // Register before checking so a concurrent post is not missed.
                let notified = self.notify.notified();
                if self.len() >= count {
                    return;
                }
                notified.await;
            }
        })
        .await
        .is_ok()
    }
}

impl MessagePoster for RecordingPoster {
    fn post_message(&self, destination: TaskId, message: OutgoingMessage) {
        self.posted.lock().push((destination, message));
        self.notify.notify_waiters();
    }

    fn messages_posted(&self) -> u64 {
        self.len() as u64
    }
}
