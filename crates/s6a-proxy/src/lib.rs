//! # s6a-proxy
//!
//! Asynchronous bridge between the MME's internal tasks and a federation
//! gateway that speaks S6a (3GPP TS 29.272) on the MME's behalf.
//!
//! ## Overview
//!
//! - **Dispatch**: validate the subscriber identity, forward the request, return at once
//! - **Completion**: translate each remote outcome and post it to the consuming task
//! - **Result mapping**: transport failure, success class or error class
//! - **Relay switch**: purge requests can be acknowledged locally
//!
//! ## Architecture
//!
//! ```text
//! NAS MME ──S6aAuthInfoReq──────→ S6a proxy ──AIR──→ gateway
//! MME APP ──S6aUpdateLocationReq─→    │      ──ULR──→
//!                                     │      ──PUR──→
//!                                     │
//!            (client delivery thread) ├── S6aAuthInfoAns ──────→ NAS MME
//!                                     └── S6aUpdateLocationAns ─→ MME APP
//! ```
//!
//! ## Result Mapping
//!
//! | Transport | Error code | Posted result |
//! |-----------|------------|---------------|
//! | failed | any | `Base(UnableToComply)` |
//! | ok | `< 3001` | `Base(Success)` with payload |
//! | ok | `>= 3001` | `Experimental(code)` |
//!
//! ## Example
//!
//! ```rust,ignore
//! use s6a_proxy::{S6aProxyConfig, S6aProxyService, SpawningS6aClient};
//! use s6a_proxy::ports::S6aProxyApi;
//!
//! let config = S6aProxyConfig::from_env();
//! let client = SpawningS6aClient::from_config(rpc, runtime.handle().clone(), &config);
//! let service = S6aProxyService::new(config, client, bus.clone());
//!
//! service.submit_authentication_info_request(&request)?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod handler;
pub mod ports;
pub mod service;

pub use adapters::{S6aRpc, SpawningS6aClient};
pub use config::S6aProxyConfig;
pub use domain::{
    map_result, AuthenticationInformationAnswer, AuthenticationInformationRequest, OutcomeClass,
    ProtocolErrorCode, PurgeUeAnswer, PurgeUeRequest, RemoteAnswer, RemoteOutcome, RequestKind,
    TransportCode, TransportFailure, TransportStatus, UpdateLocationAnswer, UpdateLocationRequest,
};
pub use error::{S6aProxyError, S6aProxyResult};
pub use handler::{CompletionHandler, RequestContext, ResponseTranslator};
pub use ports::{Accepted, Completion, S6aProxyApi, S6aRemoteClient};
pub use service::S6aProxyService;
