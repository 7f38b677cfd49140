//! Domain layer for the S6a bridge
//!
//! Pure types and mappings with no I/O: the remote request/answer schema and
//! the mapping of remote outcomes onto `S6aResult`.

pub mod result_code;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use result_code::{map_result, OutcomeClass};
pub use wire::{
    AggregatedMaximumBitrate, ApnConfigurationWire, AuthenticationInformationAnswer,
    AuthenticationInformationRequest, EutranVectorWire, ProtocolErrorCode, PurgeUeAnswer,
    PurgeUeRequest, RemoteAnswer, RemoteOutcome, TransportCode, TransportFailure,
    TransportStatus, UpdateLocationAnswer, UpdateLocationRequest,
};

/// The three request kinds the bridge forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    AuthenticationInfo,
    UpdateLocation,
    Purge,
}

impl RequestKind {
    /// Label used in log fields and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthenticationInfo => "authentication_info",
            Self::UpdateLocation => "update_location",
            Self::Purge => "purge",
        }
    }

    #[must_use]
    pub const fn request_name(self) -> &'static str {
        match self {
            Self::AuthenticationInfo => "S6A-AUTHENTICATION-INFORMATION-REQUEST",
            Self::UpdateLocation => "S6A-UPDATE-LOCATION-REQUEST",
            Self::Purge => "S6A-PURGE-UE-REQUEST",
        }
    }

    #[must_use]
    pub const fn answer_name(self) -> &'static str {
        match self {
            Self::AuthenticationInfo => "S6A-AUTHENTICATION-INFORMATION-ANSWER",
            Self::UpdateLocation => "S6A-UPDATE-LOCATION-ANSWER",
            Self::Purge => "S6A-PURGE-UE-ANSWER",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
