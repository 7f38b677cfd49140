//! Hexagonal ports
//!
//! - `inbound`: what the MME tasks call (`S6aProxyApi`)
//! - `outbound`: what the bridge needs from the gateway client (`S6aRemoteClient`)

pub mod inbound;
pub mod outbound;

pub use inbound::{Accepted, S6aProxyApi};
pub use outbound::{Completion, S6aRemoteClient};
