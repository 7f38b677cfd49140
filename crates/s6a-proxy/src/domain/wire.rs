//! Remote service schema
//!
//! Requests and answers exchanged with the federation gateway, the protocol
//! error codes carried inside answers, and the transport-level status that
//! accompanies every answer.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// PROTOCOL ERROR CODES
// =============================================================================

/// Result code carried inside a remote answer.
///
/// The value space is open: a gateway may return codes this bridge has no
/// name for, and those are classified by numeric range alone.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProtocolErrorCode(pub u32);

impl ProtocolErrorCode {
    pub const UNDEFINED: Self = Self(0);
    // Informational
    pub const MULTI_ROUND_AUTH: Self = Self(1001);
    // Success
    pub const SUCCESS: Self = Self(2001);
    pub const LIMITED_SUCCESS: Self = Self(2002);
    // Protocol errors
    pub const COMMAND_UNSUPPORTED: Self = Self(3001);
    pub const UNABLE_TO_DELIVER: Self = Self(3002);
    pub const REALM_NOT_SERVED: Self = Self(3003);
    pub const TOO_BUSY: Self = Self(3004);
    pub const LOOP_DETECTED: Self = Self(3005);
    pub const REDIRECT_INDICATION: Self = Self(3006);
    pub const APPLICATION_UNSUPPORTED: Self = Self(3007);
    pub const INVALID_HDR_BITS: Self = Self(3008);
    pub const INVALID_AVP_BITS: Self = Self(3009);
    pub const UNKNOWN_PEER: Self = Self(3010);
    // Transient failures
    pub const AUTHENTICATION_REJECTED: Self = Self(4001);
    pub const OUT_OF_SPACE: Self = Self(4002);
    pub const ELECTION_LOST: Self = Self(4003);
    pub const AUTHENTICATION_DATA_UNAVAILABLE: Self = Self(4181);
    // Permanent failures
    pub const USER_UNKNOWN: Self = Self(5001);
    pub const UNKNOWN_SESSION_ID: Self = Self(5002);
    pub const AUTHORIZATION_REJECTED: Self = Self(5003);
    pub const ROAMING_NOT_ALLOWED: Self = Self(5004);
    pub const UNKNOWN_EPS_SUBSCRIPTION: Self = Self(5420);
    pub const RAT_NOT_ALLOWED: Self = Self(5421);
    pub const EQUIPMENT_UNKNOWN: Self = Self(5422);
    pub const UNKNOWN_SERVING_NODE: Self = Self(5423);

    /// Lowest code treated as an error.
    pub const ERROR_CLASS_THRESHOLD: Self = Self::COMMAND_UNSUPPORTED;

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// True below `ERROR_CLASS_THRESHOLD`.
    #[must_use]
    pub const fn is_success_class(self) -> bool {
        self.0 < Self::ERROR_CLASS_THRESHOLD.0
    }

    /// True for the two codes that mean plain success: `UNDEFINED` and `SUCCESS`.
    #[must_use]
    pub const fn is_canonical_ok(self) -> bool {
        self.0 == Self::UNDEFINED.0 || self.0 == Self::SUCCESS.0
    }

    /// Symbolic name, if the code is one of the named values.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            0 => "UNDEFINED",
            1001 => "MULTI_ROUND_AUTH",
            2001 => "SUCCESS",
            2002 => "LIMITED_SUCCESS",
            3001 => "COMMAND_UNSUPPORTED",
            3002 => "UNABLE_TO_DELIVER",
            3003 => "REALM_NOT_SERVED",
            3004 => "TOO_BUSY",
            3005 => "LOOP_DETECTED",
            3006 => "REDIRECT_INDICATION",
            3007 => "APPLICATION_UNSUPPORTED",
            3008 => "INVALID_HDR_BITS",
            3009 => "INVALID_AVP_BITS",
            3010 => "UNKNOWN_PEER",
            4001 => "AUTHENTICATION_REJECTED",
            4002 => "OUT_OF_SPACE",
            4003 => "ELECTION_LOST",
            4181 => "AUTHENTICATION_DATA_UNAVAILABLE",
            5001 => "USER_UNKNOWN",
            5002 => "UNKNOWN_SESSION_ID",
            5003 => "AUTHORIZATION_REJECTED",
            5004 => "ROAMING_NOT_ALLOWED",
            5420 => "UNKNOWN_EPS_SUBSCRIPTION",
            5421 => "RAT_NOT_ALLOWED",
            5422 => "EQUIPMENT_UNKNOWN",
            5423 => "UNKNOWN_SERVING_NODE",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for ProtocolErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({name})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<u32> for ProtocolErrorCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// =============================================================================
// TRANSPORT STATUS
// =============================================================================

/// Failure category reported by the RPC transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportCode {
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

impl TransportCode {
    /// Numeric status code as used on the wire by gRPC.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Cancelled => 1,
            Self::Unknown => 2,
            Self::InvalidArgument => 3,
            Self::DeadlineExceeded => 4,
            Self::NotFound => 5,
            Self::AlreadyExists => 6,
            Self::PermissionDenied => 7,
            Self::ResourceExhausted => 8,
            Self::FailedPrecondition => 9,
            Self::Aborted => 10,
            Self::OutOfRange => 11,
            Self::Unimplemented => 12,
            Self::Internal => 13,
            Self::Unavailable => 14,
            Self::DataLoss => 15,
            Self::Unauthenticated => 16,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::Aborted => "ABORTED",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::Internal => "INTERNAL",
            Self::Unavailable => "UNAVAILABLE",
            Self::DataLoss => "DATA_LOSS",
            Self::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl fmt::Display for TransportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed remote call: the request never produced a usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct TransportFailure {
    pub code: TransportCode,
    pub message: String,
}

impl TransportFailure {
    pub fn new(code: TransportCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Transport-level status delivered alongside every answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportStatus {
    #[default]
    Ok,
    Failed(TransportFailure),
}

impl TransportStatus {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    #[must_use]
    pub fn failure(&self) -> Option<&TransportFailure> {
        match self {
            Self::Ok => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

// =============================================================================
// ANSWERS
// =============================================================================

/// Common view of the three remote answer messages.
///
/// `Default` is the answer handed to a completion when the transport failed
/// and no answer body exists.
pub trait RemoteAnswer: Default + Send + 'static {
    fn error_code(&self) -> ProtocolErrorCode;
}

/// What the remote client hands back for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOutcome<A> {
    pub status: TransportStatus,
    pub answer: A,
}

impl<A: RemoteAnswer> RemoteOutcome<A> {
    pub fn ok(answer: A) -> Self {
        Self {
            status: TransportStatus::Ok,
            answer,
        }
    }

    pub fn failed(failure: TransportFailure) -> Self {
        Self {
            status: TransportStatus::Failed(failure),
            answer: A::default(),
        }
    }

    pub fn from_result(result: Result<A, TransportFailure>) -> Self {
        match result {
            Ok(answer) => Self::ok(answer),
            Err(failure) => Self::failed(failure),
        }
    }

    #[must_use]
    pub fn error_code(&self) -> ProtocolErrorCode {
        self.answer.error_code()
    }
}

// =============================================================================
// AUTHENTICATION INFORMATION
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationInformationRequest {
    pub user_name: String,
    /// Three octets, BCD encoded.
    pub visited_plmn: Vec<u8>,
    pub num_requested_eutran_vectors: u32,
    pub immediate_response_preferred: bool,
    /// RAND || AUTS when re-synchronising, empty otherwise.
    pub resync_info: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EutranVectorWire {
    pub rand: Vec<u8>,
    pub xres: Vec<u8>,
    pub autn: Vec<u8>,
    pub kasme: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationInformationAnswer {
    pub error_code: ProtocolErrorCode,
    pub eutran_vectors: Vec<EutranVectorWire>,
}

impl RemoteAnswer for AuthenticationInformationAnswer {
    fn error_code(&self) -> ProtocolErrorCode {
        self.error_code
    }
}

// =============================================================================
// UPDATE LOCATION
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLocationRequest {
    pub user_name: String,
    pub visited_plmn: Vec<u8>,
    pub skip_subscriber_data: bool,
    pub initial_attach: bool,
    pub dual_registration_5g_indicator: bool,
    /// 1004 for E-UTRAN, 1009 for NR, as in the RAT-Type AVP.
    pub rat_type: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedMaximumBitrate {
    pub max_bandwidth_ul: u32,
    pub max_bandwidth_dl: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnConfigurationWire {
    pub context_id: u32,
    pub service_selection: String,
    pub qos_class_id: i32,
    pub priority_level: u32,
    pub ambr: AggregatedMaximumBitrate,
    /// 0 = IPv4, 1 = IPv6, 2 = IPv4v6, 3 = IPv4 or IPv6.
    pub pdn: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLocationAnswer {
    pub error_code: ProtocolErrorCode,
    pub default_context_id: u32,
    pub total_ambr: AggregatedMaximumBitrate,
    pub all_apns_included: bool,
    pub apn: Vec<ApnConfigurationWire>,
    pub msisdn: String,
    /// 0 = packet and circuit, 2 = only packet.
    pub network_access_mode: u32,
}

impl RemoteAnswer for UpdateLocationAnswer {
    fn error_code(&self) -> ProtocolErrorCode {
        self.error_code
    }
}

// =============================================================================
// PURGE UE
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeUeRequest {
    pub user_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeUeAnswer {
    pub error_code: ProtocolErrorCode,
}

impl RemoteAnswer for PurgeUeAnswer {
    fn error_code(&self) -> ProtocolErrorCode {
        self.error_code
    }
}
