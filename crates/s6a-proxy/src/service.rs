//! S6a Proxy Service
//!
//! Validates requests from the MME tasks, hands them to the remote client and
//! arranges for each answer to come back through the `CompletionHandler`.

use bridge_telemetry::{log_imsi_event, metric_inc, S6A_REQUESTS};
use shared_bus::MessagePoster;
use shared_types::{Imsi, ImsiError, S6aAuthInfoReq, S6aUpdateLocationReq, IMSI_BCD_DIGITS_MAX};
use std::sync::Arc;
use tracing::error;

use crate::adapters::convert;
use crate::config::S6aProxyConfig;
use crate::domain::RequestKind;
use crate::error::{S6aProxyError, S6aProxyResult};
use crate::handler::{CompletionHandler, RequestContext};
use crate::ports::{Accepted, Completion, S6aProxyApi, S6aRemoteClient};

/// The S6a bridge.
///
/// Generic over the remote client `C` and the message poster `P` so tests can
/// substitute both.
pub struct S6aProxyService<C, P> {
    config: S6aProxyConfig,
    client: C,
    handler: Arc<CompletionHandler<P>>,
}

impl<C, P> S6aProxyService<C, P>
where
    C: S6aRemoteClient,
    P: MessagePoster + 'static,
{
    pub fn new(config: S6aProxyConfig, client: C, poster: P) -> Self {
        Self {
            config,
            client,
            handler: Arc::new(CompletionHandler::new(poster)),
        }
    }

    pub fn config(&self) -> &S6aProxyConfig {
        &self.config
    }

    pub fn poster(&self) -> &P {
        self.handler.poster()
    }

    /// Parse the identity and check the declared length.
    fn admit(&self, kind: RequestKind, raw: &str, declared: u8) -> S6aProxyResult<Imsi> {
        let imsi = parse_imsi(kind, raw)?;

        if usize::from(declared) > IMSI_BCD_DIGITS_MAX {
            return Err(rejected(S6aProxyError::ImsiLengthExceeded {
                kind,
                declared,
                max: IMSI_BCD_DIGITS_MAX,
            }));
        }

        Ok(imsi)
    }
}

fn parse_imsi(kind: RequestKind, raw: &str) -> S6aProxyResult<Imsi> {
    Imsi::parse(raw).map_err(|source| {
        rejected(match source {
            ImsiError::Missing => S6aProxyError::MissingImsi { kind },
            source => S6aProxyError::InvalidImsi { kind, source },
        })
    })
}

fn rejected(err: S6aProxyError) -> S6aProxyError {
    error!(kind = %err.kind(), reason = err.reason(), error = %err, "Rejected S6a request");
    metric_inc!(S6A_REQUESTS, &[err.kind().as_str(), "rejected"]);
    err
}

fn forwarded(kind: RequestKind) -> S6aProxyResult<Accepted> {
    metric_inc!(S6A_REQUESTS, &[kind.as_str(), "forwarded"]);
    Ok(Accepted::Forwarded)
}

impl<C, P> S6aProxyApi for S6aProxyService<C, P>
where
    C: S6aRemoteClient,
    P: MessagePoster + 'static,
{
    fn submit_authentication_info_request(
        &self,
        request: &S6aAuthInfoReq,
    ) -> S6aProxyResult<Accepted> {
        let kind = RequestKind::AuthenticationInfo;
        let imsi = self.admit(kind, &request.imsi, request.imsi_length)?;
        let ctx = RequestContext::capture(kind, imsi, request.imsi_length);

        log_imsi_event!(info, kind, imsi;
            correlation_id = %ctx.correlation_id,
            vectors = request.nb_of_vectors,
            resync = request.resync_param.is_some(),
            "Sending {}",
            kind.request_name()
        );

        let handler = Arc::clone(&self.handler);
        self.client.authentication_info(
            convert::authentication_info_request(&imsi, request),
            Completion::new(kind, move |outcome| {
                handler.on_authentication_info(ctx, outcome);
            }),
        );

        forwarded(kind)
    }

    fn submit_update_location_request(
        &self,
        request: &S6aUpdateLocationReq,
    ) -> S6aProxyResult<Accepted> {
        let kind = RequestKind::UpdateLocation;
        let imsi = self.admit(kind, &request.imsi, request.imsi_length)?;
        let ctx = RequestContext::capture(kind, imsi, request.imsi_length);

        log_imsi_event!(debug, kind, imsi;
            correlation_id = %ctx.correlation_id,
            initial_attach = request.initial_attach,
            "Sending {}",
            kind.request_name()
        );

        let handler = Arc::clone(&self.handler);
        self.client.update_location(
            convert::update_location_request(&imsi, request),
            Completion::new(kind, move |outcome| {
                handler.on_update_location(ctx, outcome);
            }),
        );

        forwarded(kind)
    }

    fn submit_purge_request(&self, imsi: Option<&str>) -> S6aProxyResult<Accepted> {
        let kind = RequestKind::Purge;
        let raw = imsi.ok_or_else(|| rejected(S6aProxyError::MissingImsi { kind }))?;

        if !self.config.remote_integration_enabled {
            log_imsi_event!(debug, kind, raw; "Remote integration disabled, purge not forwarded");
            metric_inc!(S6A_REQUESTS, &[kind.as_str(), "bypassed"]);
            return Ok(Accepted::Bypassed);
        }

        let imsi = parse_imsi(kind, raw)?;
        // The identity's own length stands in for the declared one.
        let ctx = RequestContext::capture(kind, imsi, imsi.len() as u8);

        log_imsi_event!(info, kind, imsi;
            correlation_id = %ctx.correlation_id,
            "Sending {}",
            kind.request_name()
        );

        let handler = Arc::clone(&self.handler);
        self.client.purge_ue(
            convert::purge_request(&imsi),
            Completion::new(kind, move |outcome| {
                handler.on_purge(ctx, outcome);
            }),
        );

        forwarded(kind)
    }
}
