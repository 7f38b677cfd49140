//! Callback client over an async RPC stub
//!
//! `SpawningS6aClient` adapts any `S6aRpc` implementation (a gRPC channel in
//! production, an in-memory fake in tests) to the `S6aRemoteClient` port: each
//! call is spawned on a Tokio runtime and its result is handed to the
//! request's `Completion` from the runtime's worker thread.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::debug;

use crate::config::S6aProxyConfig;
use crate::domain::{
    AuthenticationInformationAnswer, AuthenticationInformationRequest, PurgeUeAnswer,
    PurgeUeRequest, RemoteAnswer, RemoteOutcome, TransportCode, TransportFailure,
    UpdateLocationAnswer, UpdateLocationRequest,
};
use crate::ports::{Completion, S6aRemoteClient};

/// Async stub for the gateway's S6a service.
#[async_trait]
pub trait S6aRpc: Send + Sync + 'static {
    async fn authentication_information(
        &self,
        request: AuthenticationInformationRequest,
    ) -> Result<AuthenticationInformationAnswer, TransportFailure>;

    async fn update_location(
        &self,
        request: UpdateLocationRequest,
    ) -> Result<UpdateLocationAnswer, TransportFailure>;

    async fn purge_ue(&self, request: PurgeUeRequest) -> Result<PurgeUeAnswer, TransportFailure>;
}

/// `S6aRemoteClient` that runs each call as a Tokio task.
pub struct SpawningS6aClient<R> {
    rpc: Arc<R>,
    runtime: Handle,
    deadline: Option<Duration>,
}

impl<R: S6aRpc> SpawningS6aClient<R> {
    pub fn new(rpc: Arc<R>, runtime: Handle, deadline: Option<Duration>) -> Self {
        Self {
            rpc,
            runtime,
            deadline,
        }
    }

    pub fn from_config(rpc: Arc<R>, runtime: Handle, config: &S6aProxyConfig) -> Self {
        Self::new(rpc, runtime, config.rpc_deadline)
    }

    fn spawn_call<A, F>(&self, completion: Completion<A>, call: F)
    where
        A: RemoteAnswer,
        F: Future<Output = Result<A, TransportFailure>> + Send + 'static,
    {
        let deadline = self.deadline;
        self.runtime.spawn(async move {
            let kind = completion.kind();
            let result = match deadline {
                Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                    Err(TransportFailure::new(
                        TransportCode::DeadlineExceeded,
                        format!("deadline of {}ms exceeded", limit.as_millis()),
                    ))
                }),
                None => call.await,
            };
            debug!(kind = %kind, ok = result.is_ok(), "Remote call finished");
            completion.complete(RemoteOutcome::from_result(result));
        });
    }
}

impl<R: S6aRpc> S6aRemoteClient for SpawningS6aClient<R> {
    fn authentication_info(
        &self,
        request: AuthenticationInformationRequest,
        completion: Completion<AuthenticationInformationAnswer>,
    ) {
        let rpc = Arc::clone(&self.rpc);
        self.spawn_call(completion, async move {
            rpc.authentication_information(request).await
        });
    }

    fn update_location(
        &self,
        request: UpdateLocationRequest,
        completion: Completion<UpdateLocationAnswer>,
    ) {
        let rpc = Arc::clone(&self.rpc);
        self.spawn_call(completion, async move { rpc.update_location(request).await });
    }

    fn purge_ue(&self, request: PurgeUeRequest, completion: Completion<PurgeUeAnswer>) {
        let rpc = Arc::clone(&self.rpc);
        self.spawn_call(completion, async move { rpc.purge_ue(request).await });
    }
}
