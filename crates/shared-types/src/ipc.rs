//! # Inter-Task Message Payloads
//!
//! Defines the S6a request envelopes produced by the MME tasks and the
//! answers the bridge posts back to them.
//!
//! ## Design Rules
//!
//! - Every answer carries exactly one `S6aResult`.
//! - Kind-specific answer fields are `Option`s that are only `Some` when the
//!   result is `Base(Success)`.
//! - Requests carry the raw identity digits plus their declared length;
//!   the bridge validates both before accepting the request.

use crate::entities::{Imsi, Plmn, RatType};
use serde::{Deserialize, Serialize};

// =============================================================================
// RESULT REPRESENTATION
// =============================================================================

/// Standard Diameter outcomes reported as a base result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseResult {
    /// DIAMETER_SUCCESS.
    Success,
    /// DIAMETER_UNABLE_TO_COMPLY.
    UnableToComply,
}

impl BaseResult {
    /// The Diameter Result-Code value (RFC 6733).
    #[must_use]
    pub const fn diameter_code(self) -> u32 {
        match self {
            Self::Success => 2001,
            Self::UnableToComply => 5012,
        }
    }
}

/// The outcome of an S6a exchange as seen by a consumer task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum S6aResult {
    /// A standard success or failure outcome.
    Base(BaseResult),
    /// The raw protocol error code of an error-class answer.
    Experimental(u32),
}

impl S6aResult {
    /// True only for `Base(Success)`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Base(BaseResult::Success))
    }
}

// =============================================================================
// AUTHENTICATION INFORMATION (NAS MME <-> S6A)
// =============================================================================

/// Length of the re-synchronisation parameter: RAND (16) || AUTS (14).
pub const RESYNC_PARAM_LENGTH: usize = 30;

/// Request for authentication vectors.
/// Sender: NAS MME | Receiver: S6a bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S6aAuthInfoReq {
    /// Subscriber identity digits.
    pub imsi: String,
    /// Declared number of identity digits.
    pub imsi_length: u8,
    /// PLMN of the serving network.
    pub visited_plmn: Plmn,
    /// Number of E-UTRAN vectors requested.
    pub nb_of_vectors: u8,
    /// Present when the UE asked for a SQN re-synchronisation.
    pub resync_param: Option<[u8; RESYNC_PARAM_LENGTH]>,
}

/// One E-UTRAN authentication vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EutranVector {
    pub rand: [u8; 16],
    /// Expected response, 4 to 16 octets.
    pub xres: Vec<u8>,
    pub autn: [u8; 16],
    pub kasme: [u8; 32],
}

/// Authentication data returned on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationInfo {
    pub eutran_vectors: Vec<EutranVector>,
}

/// Answer to `S6aAuthInfoReq`.
/// Sender: S6a bridge | Receiver: NAS MME
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S6aAuthInfoAns {
    pub imsi: Imsi,
    pub imsi_length: u8,
    pub result: S6aResult,
    /// Only present for `Base(Success)`.
    pub auth_info: Option<AuthenticationInfo>,
}

// =============================================================================
// UPDATE LOCATION (MME APP <-> S6A)
// =============================================================================

/// Request to register the serving MME for a subscriber.
/// Sender: MME APP | Receiver: S6a bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S6aUpdateLocationReq {
    /// Subscriber identity digits.
    pub imsi: String,
    /// Declared number of identity digits.
    pub imsi_length: u8,
    /// PLMN of the serving network.
    pub visited_plmn: Plmn,
    pub rat_type: RatType,
    pub initial_attach: bool,
    pub skip_subscriber_data: bool,
    pub dual_registration_5g: bool,
}

/// Aggregate maximum bit rate, in bits per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ambr {
    pub max_bandwidth_ul: u32,
    pub max_bandwidth_dl: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PdnType {
    #[default]
    Ipv4,
    Ipv6,
    Ipv4v6,
    Ipv4OrIpv6,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkAccessMode {
    #[default]
    PacketAndCircuit,
    OnlyPacket,
}

/// Subscribed configuration of one access point name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnConfiguration {
    pub context_identifier: u32,
    pub service_selection: String,
    pub pdn_type: PdnType,
    /// QoS class identifier.
    pub qci: i32,
    pub priority_level: u32,
    pub ambr: Ambr,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnConfigProfile {
    pub context_identifier: u32,
    pub all_apn_conf_ind: bool,
    pub apn_configs: Vec<ApnConfiguration>,
}

/// Subscription data returned on a successful update location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLocationData {
    pub msisdn: String,
    pub network_access_mode: NetworkAccessMode,
    pub subscriber_ambr: Ambr,
    pub apn_profile: ApnConfigProfile,
}

/// Answer to `S6aUpdateLocationReq`.
/// Sender: S6a bridge | Receiver: MME APP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S6aUpdateLocationAns {
    pub imsi: Imsi,
    pub imsi_length: u8,
    pub result: S6aResult,
    /// Only present for `Base(Success)`.
    pub location: Option<UpdateLocationData>,
}

// =============================================================================
// TASK MESSAGE
// =============================================================================

/// Discriminant of a `TaskMessage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    S6aAuthInfoAns,
    S6aUpdateLocationAns,
}

/// Payload of every envelope delivered to a task inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskMessage {
    S6aAuthInfoAns(S6aAuthInfoAns),
    S6aUpdateLocationAns(S6aUpdateLocationAns),
}

impl TaskMessage {
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::S6aAuthInfoAns(_) => MessageKind::S6aAuthInfoAns,
            Self::S6aUpdateLocationAns(_) => MessageKind::S6aUpdateLocationAns,
        }
    }

    /// The subscriber this message is about.
    #[must_use]
    pub fn imsi(&self) -> &Imsi {
        match self {
            Self::S6aAuthInfoAns(ans) => &ans.imsi,
            Self::S6aUpdateLocationAns(ans) => &ans.imsi,
        }
    }

    #[must_use]
    pub fn result(&self) -> S6aResult {
        match self {
            Self::S6aAuthInfoAns(ans) => ans.result,
            Self::S6aUpdateLocationAns(ans) => ans.result,
        }
    }
}
