//! Error types for the S6a bridge
//!
//! Only synchronous rejections are errors. Failures of the remote call are
//! not: they travel to the consuming task as `Base(UnableToComply)`.

use shared_types::ImsiError;
use thiserror::Error;

use crate::domain::RequestKind;

/// Reasons a request is rejected before anything is sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum S6aProxyError {
    /// The request carries no subscriber identity
    #[error("{kind} request rejected: IMSI is missing")]
    MissingImsi { kind: RequestKind },

    /// The identity is not a string of up to 15 decimal digits
    #[error("{kind} request rejected: {source}")]
    InvalidImsi {
        kind: RequestKind,
        #[source]
        source: ImsiError,
    },

    /// Declared identity length is above the protocol maximum
    #[error("{kind} request rejected: declared IMSI length {declared} exceeds {max}")]
    ImsiLengthExceeded {
        kind: RequestKind,
        declared: u8,
        max: usize,
    },
}

impl S6aProxyError {
    /// Request kind that was rejected.
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::MissingImsi { kind }
            | Self::InvalidImsi { kind, .. }
            | Self::ImsiLengthExceeded { kind, .. } => *kind,
        }
    }

    /// Short reason used as a log field.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingImsi { .. } => "missing_imsi",
            Self::InvalidImsi { .. } => "invalid_imsi",
            Self::ImsiLengthExceeded { .. } => "imsi_length_exceeded",
        }
    }
}

/// Result type for bridge operations
pub type S6aProxyResult<T> = Result<T, S6aProxyError>;
