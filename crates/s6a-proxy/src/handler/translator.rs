//! Response translation
//!
//! Turns a remote outcome into the answer payload for the consuming task,
//! logging it at the severity its class calls for.

use bridge_telemetry::{log_at, metric_inc, Severity, S6A_ANSWERS};
use shared_types::{Imsi, S6aAuthInfoAns, S6aResult, S6aUpdateLocationAns};
use tracing::error;

use crate::adapters::convert;
use crate::domain::{
    map_result, AuthenticationInformationAnswer, OutcomeClass, PurgeUeAnswer, RemoteAnswer,
    RemoteOutcome, RequestKind, TransportStatus, UpdateLocationAnswer,
};

/// Result of classifying one outcome. `answer` is kept only for success.
struct Translation<A> {
    result: S6aResult,
    class: OutcomeClass,
    answer: Option<A>,
}

/// Builds outgoing answer payloads from remote outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseTranslator;

impl ResponseTranslator {
    pub fn authentication_info(
        &self,
        imsi: Imsi,
        imsi_length: u8,
        outcome: RemoteOutcome<AuthenticationInformationAnswer>,
    ) -> S6aAuthInfoAns {
        let translation = translate(
            RequestKind::AuthenticationInfo,
            &imsi,
            outcome,
            OutcomeClass::severity,
        );
        S6aAuthInfoAns {
            imsi,
            imsi_length,
            result: translation.result,
            auth_info: translation.answer.map(convert::authentication_info),
        }
    }

    pub fn update_location(
        &self,
        imsi: Imsi,
        imsi_length: u8,
        outcome: RemoteOutcome<UpdateLocationAnswer>,
    ) -> S6aUpdateLocationAns {
        let translation = translate(
            RequestKind::UpdateLocation,
            &imsi,
            outcome,
            OutcomeClass::severity,
        );
        S6aUpdateLocationAns {
            imsi,
            imsi_length,
            result: translation.result,
            location: translation.answer.map(convert::update_location_data),
        }
    }

    /// Purge answers are only logged, and a non-canonical success is not
    /// singled out.
    pub fn purge(&self, imsi: Imsi, outcome: RemoteOutcome<PurgeUeAnswer>) -> OutcomeClass {
        translate(RequestKind::Purge, &imsi, outcome, OutcomeClass::class_severity).class
    }
}

fn translate<A: RemoteAnswer>(
    kind: RequestKind,
    imsi: &Imsi,
    outcome: RemoteOutcome<A>,
    severity: fn(OutcomeClass) -> Severity,
) -> Translation<A> {
    let code = outcome.error_code();
    let class = OutcomeClass::classify(&outcome.status, code);

    match &outcome.status {
        TransportStatus::Failed(failure) => error!(
            kind = %kind,
            imsi = %imsi,
            status_code = failure.code.as_i32(),
            status = %failure.code,
            status_message = %failure.message,
            error_code = %code,
            "{} transport failure",
            kind.answer_name()
        ),
        TransportStatus::Ok => log_at!(
            severity(class),
            kind = %kind,
            imsi = %imsi,
            error_code = %code,
            outcome = class.label(),
            "Received {}",
            kind.answer_name()
        ),
    }

    metric_inc!(S6A_ANSWERS, &[kind.as_str(), class.label()]);

    Translation {
        result: map_result(&outcome.status, code),
        class,
        answer: class.carries_payload().then_some(outcome.answer),
    }
}
