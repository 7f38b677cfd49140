//! Driven port (SPI - outbound)
//!
//! The remote client takes a request plus a `Completion` and returns
//! immediately. The completion later runs on whatever thread the client
//! uses to deliver results.

use std::fmt;
use std::sync::Arc;
use tracing::error;

use crate::domain::{
    AuthenticationInformationAnswer, AuthenticationInformationRequest, PurgeUeAnswer,
    PurgeUeRequest, RemoteAnswer, RemoteOutcome, RequestKind, TransportCode, TransportFailure,
    UpdateLocationAnswer, UpdateLocationRequest,
};

type CompletionFn<A> = Box<dyn FnOnce(RemoteOutcome<A>) + Send + 'static>;

/// One-shot continuation for a single remote request.
///
/// `complete` consumes the value, so a client cannot invoke it twice. If a
/// client drops it without completing (a panicking task, a cancelled call)
/// the continuation still runs once with an `ABORTED` transport failure.
pub struct Completion<A: RemoteAnswer> {
    kind: RequestKind,
    callback: Option<CompletionFn<A>>,
}

impl<A: RemoteAnswer> Completion<A> {
    pub fn new(kind: RequestKind, callback: impl FnOnce(RemoteOutcome<A>) + Send + 'static) -> Self {
        Self {
            kind,
            callback: Some(Box::new(callback)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Deliver the outcome of the remote call.
    pub fn complete(mut self, outcome: RemoteOutcome<A>) {
        if let Some(callback) = self.callback.take() {
            callback(outcome);
        }
    }
}

impl<A: RemoteAnswer> Drop for Completion<A> {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            error!(
                kind = %self.kind,
                "Completion dropped by remote client without an outcome"
            );
            callback(RemoteOutcome::failed(TransportFailure::new(
                TransportCode::Aborted,
                "completion dropped by remote client",
            )));
        }
    }
}

impl<A: RemoteAnswer> fmt::Debug for Completion<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("kind", &self.kind)
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

/// Asynchronous client for the federation gateway's S6a service.
///
/// Implementations must not block the caller and must eventually complete
/// or drop every `Completion` they receive.
pub trait S6aRemoteClient: Send + Sync {
    fn authentication_info(
        &self,
        request: AuthenticationInformationRequest,
        completion: Completion<AuthenticationInformationAnswer>,
    );

    fn update_location(
        &self,
        request: UpdateLocationRequest,
        completion: Completion<UpdateLocationAnswer>,
    );

    fn purge_ue(&self, request: PurgeUeRequest, completion: Completion<PurgeUeAnswer>);
}

impl<C: S6aRemoteClient + ?Sized> S6aRemoteClient for Arc<C> {
    fn authentication_info(
        &self,
        request: AuthenticationInformationRequest,
        completion: Completion<AuthenticationInformationAnswer>,
    ) {
        (**self).authentication_info(request, completion);
    }

    fn update_location(
        &self,
        request: UpdateLocationRequest,
        completion: Completion<UpdateLocationAnswer>,
    ) {
        (**self).update_location(request, completion);
    }

    fn purge_ue(&self, request: PurgeUeRequest, completion: Completion<PurgeUeAnswer>) {
        (**self).purge_ue(request, completion);
    }
}
