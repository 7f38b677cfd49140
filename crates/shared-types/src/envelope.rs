//! # `TaskEnvelope` Envelope
//!
//! The universal wrapper for every message posted to a task inbox.
//!
//! ## Properties
//!
//! - **Versioning**: All messages include a `version` field for forward compatibility.
//! - **Addressing**: `source` and `destination` identify the producing and
//!   consuming tasks.
//! - **Correlation**: The `correlation_id` ties an answer back to the request
//!   that caused it, for log correlation only.

use crate::entities::TaskId;
use crate::ipc::TaskMessage;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// The envelope for all inter-task messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEnvelope<T> {
    /// Protocol version for forward compatibility.
    pub version: u16,

    /// The task that produced the message.
    pub source: TaskId,

    /// The task whose inbox receives the message.
    pub destination: TaskId,

    /// Identifier shared with the request that triggered this message.
    pub correlation_id: Uuid,

    /// Unix timestamp (seconds since epoch) when the message was created.
    pub timestamp: u64,

    /// The actual message payload (generic over message type).
    pub payload: T,
}

impl<T> TaskEnvelope<T> {
    /// Current protocol version.
    pub const CURRENT_VERSION: u16 = 1;

    /// Wrap a payload, stamping the current version and time.
    pub fn new(source: TaskId, destination: TaskId, correlation_id: Uuid, payload: T) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            version: Self::CURRENT_VERSION,
            source,
            destination,
            correlation_id,
            timestamp,
            payload,
        }
    }
}

/// A message produced by the bridge for a consumer task.
pub type OutgoingMessage = TaskEnvelope<TaskMessage>;
