//! # Shared Bus - Inter-Task Message Delivery
//!
//! The messaging substrate between the S6a bridge and the MME tasks.
//!
//! ## Delivery Rules
//!
//! - Every task owns exactly one inbox, registered with `register_task()`.
//! - `post_message()` is fire-and-forget: it never blocks and never fails
//!   from the caller's point of view.
//! - Messages from one source arrive in the order they were posted. No
//!   ordering is guaranteed between different sources.
//! - Messages for a task without an inbox are counted as dead letters and
//!   logged at error level.
//!
//! ```text
//! ┌──────────────┐   post_message()   ┌──────────────┐   recv()   ┌──────────────┐
//! │  S6a bridge  │ ─────────────────→ │   Task Bus   │ ─────────→ │  MME inbox   │
//! └──────────────┘                    └──────────────┘            └──────────────┘
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod publisher;
pub mod recorder;
pub mod subscriber;

// Re-export main types
pub use publisher::{InMemoryTaskBus, MessagePoster};
pub use recorder::RecordingPoster;
pub use subscriber::{InboxError, InboxStream, TaskInbox};

/// Current protocol version for bus messages.
pub const PROTOCOL_VERSION: u16 = shared_types::TaskEnvelope::<()>::CURRENT_VERSION;
