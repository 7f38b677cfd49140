//! Completion handling
//!
//! Runs on the remote client's delivery thread. For each outcome it rebuilds
//! the subscriber identity from the snapshot captured at dispatch, translates
//! the outcome, and posts the answer to the consuming task.

use bridge_telemetry::{
    log_imsi_event, metric_inc, metric_observe, S6A_ANSWER_LATENCY, S6A_LOGIC_ERRORS,
};
use shared_bus::MessagePoster;
use shared_types::{Imsi, TaskEnvelope, TaskId, TaskMessage};
use std::time::Instant;
use tracing::error;
use uuid::Uuid;

use super::translator::ResponseTranslator;
use crate::domain::{
    AuthenticationInformationAnswer, PurgeUeAnswer, RemoteOutcome, RequestKind,
    UpdateLocationAnswer,
};

/// Snapshot of a request taken at dispatch and owned by its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub kind: RequestKind,
    pub imsi: Imsi,
    /// Identity length as declared by the requesting task.
    pub imsi_length: u8,
    pub correlation_id: Uuid,
    pub dispatched_at: Instant,
}

impl RequestContext {
    pub fn capture(kind: RequestKind, imsi: Imsi, imsi_length: u8) -> Self {
        Self {
            kind,
            imsi,
            imsi_length,
            correlation_id: Uuid::new_v4(),
            dispatched_at: Instant::now(),
        }
    }
}

/// Posts translated answers to the consuming tasks.
pub struct CompletionHandler<P> {
    poster: P,
    translator: ResponseTranslator,
}

impl<P: MessagePoster> CompletionHandler<P> {
    pub fn new(poster: P) -> Self {
        Self {
            poster,
            translator: ResponseTranslator,
        }
    }

    pub fn poster(&self) -> &P {
        &self.poster
    }

    pub fn on_authentication_info(
        &self,
        ctx: RequestContext,
        outcome: RemoteOutcome<AuthenticationInformationAnswer>,
    ) {
        let (imsi, imsi_length) = checked_identity(&ctx);
        let answer = self
            .translator
            .authentication_info(imsi, imsi_length, outcome);
        self.post(&ctx, TaskId::NasMme, TaskMessage::S6aAuthInfoAns(answer));
    }

    pub fn on_update_location(&self, ctx: RequestContext, outcome: RemoteOutcome<UpdateLocationAnswer>) {
        let (imsi, imsi_length) = checked_identity(&ctx);
        let answer = self.translator.update_location(imsi, imsi_length, outcome);
        self.post(&ctx, TaskId::MmeApp, TaskMessage::S6aUpdateLocationAns(answer));
        log_imsi_event!(info, ctx.kind, imsi;
            correlation_id = %ctx.correlation_id,
            "Sent {}",
            RequestKind::UpdateLocation.answer_name()
        );
    }

    /// Logs the purge answer. Nothing is posted.
    pub fn on_purge(&self, ctx: RequestContext, outcome: RemoteOutcome<PurgeUeAnswer>) {
        let (imsi, _) = checked_identity(&ctx);
        self.translator.purge(imsi, outcome);
        observe_latency(&ctx);
    }

    fn post(&self, ctx: &RequestContext, destination: TaskId, message: TaskMessage) {
        let envelope = TaskEnvelope::new(TaskId::S6a, destination, ctx.correlation_id, message);
        self.poster.post_message(destination, envelope);
        observe_latency(ctx);
    }
}

/// The identity to put in the answer.
///
/// A declared length that disagrees with the captured digits is a logic
/// error upstream; the answer still goes out, carrying the first
/// `imsi_length` digits.
fn checked_identity(ctx: &RequestContext) -> (Imsi, u8) {
    if usize::from(ctx.imsi_length) == ctx.imsi.len() {
        return (ctx.imsi, ctx.imsi_length);
    }

    error!(
        kind = %ctx.kind,
        imsi = %ctx.imsi,
        declared_length = ctx.imsi_length,
        actual_length = ctx.imsi.len(),
        "Declared IMSI length does not match captured identity"
    );
    metric_inc!(S6A_LOGIC_ERRORS, &[ctx.kind.as_str()]);

    let copied = ctx.imsi.truncated(usize::from(ctx.imsi_length));
    // truncated() never yields more than 15 digits
    (copied, copied.len() as u8)
}

fn observe_latency(ctx: &RequestContext) {
    metric_observe!(
        S6A_ANSWER_LATENCY,
        &[ctx.kind.as_str()],
        ctx.dispatched_at.elapsed().as_secs_f64()
    );
}
