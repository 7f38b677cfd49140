//! Adapters
//!
//! - `convert`: field conversion between task messages and the remote schema
//! - `rpc_client`: `S6aRemoteClient` on top of an async RPC stub

pub mod convert;
pub mod rpc_client;

pub use rpc_client::{S6aRpc, SpawningS6aClient};
