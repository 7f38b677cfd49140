//! Result-code mapping
//!
//! Every remote outcome lands in exactly one of three classes, decided by the
//! transport status first and the protocol error code second:
//!
//! | Transport | Error code          | `S6aResult`              |
//! |-----------|---------------------|--------------------------|
//! | failed    | (ignored)           | `Base(UnableToComply)`   |
//! | ok        | `< 3001`            | `Base(Success)`          |
//! | ok        | `>= 3001`           | `Experimental(code)`     |

use bridge_telemetry::Severity;
use shared_types::{BaseResult, S6aResult};

use super::wire::{ProtocolErrorCode, TransportStatus};

/// Classification of one remote outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeClass {
    /// The call failed before any answer was produced.
    TransportFailure,
    /// Success-class code. `canonical` is false for codes other than
    /// `UNDEFINED` and `SUCCESS`, which are still treated as success but
    /// logged as notable.
    Success { canonical: bool },
    /// Error-class code, relayed verbatim as an experimental result.
    ErrorClass,
}

impl OutcomeClass {
    #[must_use]
    pub fn classify(status: &TransportStatus, code: ProtocolErrorCode) -> Self {
        if !status.is_ok() {
            Self::TransportFailure
        } else if code.is_success_class() {
            Self::Success {
                canonical: code.is_canonical_ok(),
            }
        } else {
            Self::ErrorClass
        }
    }

    /// Only a canonical success is logged at info.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Success { canonical: true } => Severity::Info,
            _ => Severity::Error,
        }
    }

    /// Severity for answers that are only logged: any success-class code is
    /// info, everything else error.
    #[must_use]
    pub const fn class_severity(self) -> Severity {
        match self {
            Self::Success { .. } => Severity::Info,
            _ => Severity::Error,
        }
    }

    /// Outcome label for the answers counter.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TransportFailure => "transport_failure",
            Self::Success { canonical: true } => "success",
            Self::Success { canonical: false } => "notable_success",
            Self::ErrorClass => "error_class",
        }
    }

    /// Whether the outgoing answer carries a converted payload.
    #[must_use]
    pub const fn carries_payload(self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Map a transport status and error code onto the result reported to the
/// consuming task.
#[must_use]
pub fn map_result(status: &TransportStatus, code: ProtocolErrorCode) -> S6aResult {
    match OutcomeClass::classify(status, code) {
        OutcomeClass::TransportFailure => S6aResult::Base(BaseResult::UnableToComply),
        OutcomeClass::Success { .. } => S6aResult::Base(BaseResult::Success),
        OutcomeClass::ErrorClass => S6aResult::Experimental(code.value()),
    }
}
