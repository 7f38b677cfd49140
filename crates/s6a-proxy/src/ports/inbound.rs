//! Driving port (API - inbound)

use shared_types::{S6aAuthInfoReq, S6aUpdateLocationReq};

use crate::error::S6aProxyResult;

/// How an accepted request was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepted {
    /// Sent to the gateway; an answer will be posted to the consuming task.
    Forwarded,
    /// Acknowledged locally without contacting the gateway.
    Bypassed,
}

/// Entry points used by the MME tasks.
///
/// Every method returns without waiting for the gateway. A rejection is
/// reported synchronously and nothing is posted for it.
pub trait S6aProxyApi: Send + Sync {
    /// Forward an authentication-information request.
    ///
    /// The answer is posted to `TASK_NAS_MME`.
    fn submit_authentication_info_request(
        &self,
        request: &S6aAuthInfoReq,
    ) -> S6aProxyResult<Accepted>;

    /// Forward an update-location request.
    ///
    /// The answer is posted to `TASK_MME_APP`.
    fn submit_update_location_request(
        &self,
        request: &S6aUpdateLocationReq,
    ) -> S6aProxyResult<Accepted>;

    /// Forward a purge request. No answer is posted for purges.
    ///
    /// Returns `Accepted::Bypassed` when remote integration is disabled.
    fn submit_purge_request(&self, imsi: Option<&str>) -> S6aProxyResult<Accepted>;
}
