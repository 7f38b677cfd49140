//! # Shared Types Crate
//!
//! This crate contains the task identifiers, subscriber identities, and the
//! inter-task message payloads exchanged between the S6a bridge and the MME
//! tasks that consume its answers.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-task types are defined here.
//! - **Envelope Integrity**: Every message posted to a task inbox is wrapped
//!   in a `TaskEnvelope<T>` carrying source, destination and correlation id.
//! - **Owned Identities**: `Imsi` is a fixed-capacity `Copy` value so it can
//!   be captured by value across asynchronous boundaries.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod ipc;

pub use entities::*;
pub use envelope::{OutgoingMessage, TaskEnvelope};
pub use errors::*;
pub use ipc::*;
