//! # Integration Test Flows
//!
//! Drives the S6a bridge end to end: requests go through `S6aProxyService`,
//! a fake gateway answers on Tokio worker threads, and answers arrive in the
//! inboxes of the NAS MME and MME APP tasks via `InMemoryTaskBus`.
//!
//! ## Flows Tested:
//!
//! 1. **NAS MME → S6a → NAS MME**: authentication info, success and failure
//! 2. **MME APP → S6a → MME APP**: update location, success and error class
//! 3. **Purge**: forwarded or bypassed, never answered
//! 4. **Concurrency**: many requests in flight, answers out of order

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use futures::StreamExt;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::runtime::Handle;
    use tokio::time::timeout;

    // Shared infrastructure
    use shared_bus::{InMemoryTaskBus, MessagePoster, TaskInbox};
    use shared_types::{
        BaseResult, OutgoingMessage, Plmn, RatType, S6aAuthInfoReq, S6aResult,
        S6aUpdateLocationReq, TaskId, TaskMessage,
    };

    // S6a bridge
    use s6a_proxy::domain::{AggregatedMaximumBitrate, ApnConfigurationWire, EutranVectorWire};
    use s6a_proxy::{
        Accepted, AuthenticationInformationAnswer, AuthenticationInformationRequest,
        ProtocolErrorCode, PurgeUeAnswer, PurgeUeRequest, S6aProxyApi, S6aProxyConfig,
        S6aProxyError, S6aProxyService, S6aRpc, SpawningS6aClient, TransportCode,
        TransportFailure, UpdateLocationAnswer, UpdateLocationRequest,
    };

    const RECV_LIMIT: Duration = Duration::from_secs(5);

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Scripted behaviour of the fake gateway for one subscriber.
    #[derive(Clone)]
    enum Script {
        Answer { code: ProtocolErrorCode, delay: Duration },
        Fail(TransportCode, &'static str),
        Hang,
    }

    /// In-memory gateway keyed by user name. Unscripted subscribers get SUCCESS.
    #[derive(Default)]
    struct FakeGateway {
        scripts: Mutex<HashMap<String, Script>>,
        purged: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl FakeGateway {
        fn script(&self, user_name: &str, script: Script) {
            self.scripts.lock().insert(user_name.to_string(), script);
        }

        async fn run(&self, user_name: &str) -> Result<ProtocolErrorCode, TransportFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let script = self.scripts.lock().get(user_name).cloned();
            match script {
                None => Ok(ProtocolErrorCode::SUCCESS),
                Some(Script::Answer { code, delay }) => {
                    tokio::time::sleep(delay).await;
                    Ok(code)
                }
                Some(Script::Fail(code, message)) => Err(TransportFailure::new(code, message)),
                Some(Script::Hang) => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(ProtocolErrorCode::SUCCESS)
                }
            }
        }
    }

    #[async_trait]
    impl S6aRpc for FakeGateway {
        async fn authentication_information(
            &self,
            request: AuthenticationInformationRequest,
        ) -> Result<AuthenticationInformationAnswer, TransportFailure> {
            let error_code = self.run(&request.user_name).await?;
            let eutran_vectors = (0..request.num_requested_eutran_vectors)
                .map(|i| EutranVectorWire {
                    rand: vec![i as u8; 16],
                    xres: vec![0xEE; 8],
                    autn: vec![0xAA; 16],
                    kasme: vec![0x55; 32],
                })
                .collect();
            Ok(AuthenticationInformationAnswer {
                error_code,
                eutran_vectors,
            })
        }

        async fn update_location(
            &self,
            request: UpdateLocationRequest,
        ) -> Result<UpdateLocationAnswer, TransportFailure> {
            let error_code = self.run(&request.user_name).await?;
            Ok(UpdateLocationAnswer {
                error_code,
                default_context_id: 1,
                total_ambr: AggregatedMaximumBitrate {
                    max_bandwidth_ul: 50_000_000,
                    max_bandwidth_dl: 100_000_000,
                },
                all_apns_included: false,
                apn: vec![ApnConfigurationWire {
                    context_id: 1,
                    service_selection: "internet".to_string(),
                    qos_class_id: 9,
                    priority_level: 15,
                    ..ApnConfigurationWire::default()
                }],
                msisdn: "15551230000".to_string(),
                network_access_mode: 2,
            })
        }

        async fn purge_ue(&self, request: PurgeUeRequest) -> Result<PurgeUeAnswer, TransportFailure> {
            self.purged.lock().push(request.user_name.clone());
            let error_code = self.run(&request.user_name).await?;
            Ok(PurgeUeAnswer { error_code })
        }
    }

    type Bridge = S6aProxyService<SpawningS6aClient<FakeGateway>, Arc<InMemoryTaskBus>>;

    struct Harness {
        bridge: Bridge,
        gateway: Arc<FakeGateway>,
        bus: Arc<InMemoryTaskBus>,
        nas_mme: TaskInbox,
        mme_app: TaskInbox,
    }

    fn harness(config: S6aProxyConfig) -> Harness {
        let bus = Arc::new(InMemoryTaskBus::new());
        let nas_mme = bus.register_task(TaskId::NasMme);
        let mme_app = bus.register_task(TaskId::MmeApp);
        let gateway = Arc::new(FakeGateway::default());
        let client = SpawningS6aClient::from_config(Arc::clone(&gateway), Handle::current(), &config);

        Harness {
            bridge: S6aProxyService::new(config, client, Arc::clone(&bus)),
            gateway,
            bus,
            nas_mme,
            mme_app,
        }
    }

    fn air(imsi: &str, vectors: u8) -> S6aAuthInfoReq {
        S6aAuthInfoReq {
            imsi: imsi.to_string(),
            imsi_length: imsi.len() as u8,
            visited_plmn: Plmn([0x00, 0xF1, 0x10]),
            nb_of_vectors: vectors,
            resync_param: None,
        }
    }

    fn ulr(imsi: &str) -> S6aUpdateLocationReq {
        S6aUpdateLocationReq {
            imsi: imsi.to_string(),
            imsi_length: imsi.len() as u8,
            visited_plmn: Plmn([0x00, 0xF1, 0x10]),
            rat_type: RatType::Eutran,
            initial_attach: true,
            skip_subscriber_data: false,
            dual_registration_5g: false,
        }
    }

    async fn next(inbox: &mut TaskInbox) -> OutgoingMessage {
        timeout(RECV_LIMIT, inbox.recv())
            .await
            .expect("answer not delivered in time")
            .expect("inbox closed")
    }

    // =============================================================================
    // AUTHENTICATION INFO: NAS MME → S6A → NAS MME
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_auth_info_success_delivers_vectors() {
        let mut h = harness(S6aProxyConfig::default());
        h.gateway.script(
            "001010000000001",
            Script::Answer {
                code: ProtocolErrorCode::UNDEFINED,
                delay: Duration::ZERO,
            },
        );

        let accepted = h
            .bridge
            .submit_authentication_info_request(&air("001010000000001", 2))
            .unwrap();
        assert_eq!(accepted, Accepted::Forwarded);

        let envelope = next(&mut h.nas_mme).await;
        assert_eq!(envelope.source, TaskId::S6a);
        assert_eq!(envelope.destination, TaskId::NasMme);

        match envelope.payload {
            TaskMessage::S6aAuthInfoAns(ans) => {
                assert_eq!(ans.imsi.as_str(), "001010000000001");
                assert_eq!(ans.imsi_length, 15);
                assert_eq!(ans.result, S6aResult::Base(BaseResult::Success));
                let vectors = ans.auth_info.unwrap().eutran_vectors;
                assert_eq!(vectors.len(), 2);
                assert_eq!(vectors[1].rand, [1; 16]);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_auth_info_transport_failure_is_unable_to_comply() {
        let mut h = harness(S6aProxyConfig::default());
        h.gateway.script(
            "001010000000009",
            Script::Fail(TransportCode::Unavailable, "unavailable"),
        );

        h.bridge
            .submit_authentication_info_request(&air("001010000000009", 1))
            .unwrap();

        let envelope = next(&mut h.nas_mme).await;
        assert_eq!(
            envelope.payload.result(),
            S6aResult::Base(BaseResult::UnableToComply)
        );
        assert!(matches!(
            envelope.payload,
            TaskMessage::S6aAuthInfoAns(ref ans) if ans.auth_info.is_none()
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_deadline_expiry_is_unable_to_comply() {
        let config = S6aProxyConfig {
            rpc_deadline: Some(Duration::from_millis(50)),
            ..S6aProxyConfig::default()
        };
        let mut h = harness(config);
        h.gateway.script("001010000000010", Script::Hang);

        h.bridge
            .submit_authentication_info_request(&air("001010000000010", 1))
            .unwrap();

        let envelope = next(&mut h.nas_mme).await;
        assert_eq!(
            envelope.payload.result(),
            S6aResult::Base(BaseResult::UnableToComply)
        );
    }

    // =============================================================================
    // UPDATE LOCATION: MME APP → S6A → MME APP
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_update_location_error_class_relayed() {
        let mut h = harness(S6aProxyConfig::default());
        h.gateway.script(
            "001010000000002",
            Script::Answer {
                code: ProtocolErrorCode::UNKNOWN_SESSION_ID,
                delay: Duration::ZERO,
            },
        );

        h.bridge
            .submit_update_location_request(&ulr("001010000000002"))
            .unwrap();

        let envelope = next(&mut h.mme_app).await;
        match envelope.payload {
            TaskMessage::S6aUpdateLocationAns(ans) => {
                assert_eq!(ans.result, S6aResult::Experimental(5002));
                assert!(ans.location.is_none());
            }
            other => panic!("unexpected payload: {other:?}"),
        }
        assert!(h.nas_mme.try_recv().unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_update_location_success_carries_subscription() {
        let mut h = harness(S6aProxyConfig::default());

        h.bridge
            .submit_update_location_request(&ulr("001010000000003"))
            .unwrap();

        let envelope = next(&mut h.mme_app).await;
        match envelope.payload {
            TaskMessage::S6aUpdateLocationAns(ans) => {
                assert_eq!(ans.result, S6aResult::Base(BaseResult::Success));
                let location = ans.location.unwrap();
                assert_eq!(location.msisdn, "15551230000");
                assert_eq!(location.subscriber_ambr.max_bandwidth_dl, 100_000_000);
                assert_eq!(location.apn_profile.apn_configs.len(), 1);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    // =============================================================================
    // PURGE
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_purge_bypassed_when_relay_disabled() {
        let mut h = harness(S6aProxyConfig::relay_disabled());

        let accepted = h.bridge.submit_purge_request(Some("001010000000004")).unwrap();

        assert_eq!(accepted, Accepted::Bypassed);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(h.gateway.calls.load(Ordering::SeqCst), 0);
        assert!(h.nas_mme.try_recv().unwrap().is_none());
        assert!(h.mme_app.try_recv().unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_purge_forwarded_but_never_answered() {
        let mut h = harness(S6aProxyConfig::default());

        let accepted = h.bridge.submit_purge_request(Some("001010000000005")).unwrap();
        assert_eq!(accepted, Accepted::Forwarded);

        timeout(RECV_LIMIT, async {
            while h.gateway.purged.lock().is_empty() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(h.gateway.purged.lock().as_slice(), ["001010000000005"]);
        assert_eq!(h.bus.messages_posted(), 0);
        assert!(h.mme_app.try_recv().unwrap().is_none());
    }

    // =============================================================================
    // REJECTIONS
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_rejected_requests_post_nothing() {
        let h = harness(S6aProxyConfig::relay_disabled());

        assert!(matches!(
            h.bridge.submit_authentication_info_request(&air("", 1)),
            Err(S6aProxyError::MissingImsi { .. })
        ));
        assert!(matches!(
            h.bridge.submit_update_location_request(&ulr("0010100000000011")),
            Err(S6aProxyError::InvalidImsi { .. })
        ));
        // A missing identity is rejected even with the relay disabled.
        assert!(matches!(
            h.bridge.submit_purge_request(None),
            Err(S6aProxyError::MissingImsi { .. })
        ));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(h.gateway.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.bus.messages_posted(), 0);
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_out_of_order_answers_match_their_requests() {
        const REQUESTS: u64 = 40;
        let h = harness(S6aProxyConfig::default());

        let imsis: Vec<String> = (0..REQUESTS).map(|i| format!("00101{i:010}")).collect();
        for (i, imsi) in imsis.iter().enumerate() {
            // Later requests answer first.
            let delay = Duration::from_millis((REQUESTS - i as u64) * 2);
            let code = if i % 3 == 0 {
                ProtocolErrorCode::USER_UNKNOWN
            } else {
                ProtocolErrorCode::SUCCESS
            };
            h.gateway.script(imsi, Script::Answer { code, delay });
        }

        for imsi in &imsis {
            h.bridge
                .submit_authentication_info_request(&air(imsi, 1))
                .unwrap();
        }

        let answers: Vec<OutgoingMessage> = timeout(
            RECV_LIMIT,
            h.nas_mme
                .into_stream()
                .take(REQUESTS as usize)
                .collect::<Vec<_>>(),
        )
        .await
        .unwrap();

        assert_eq!(answers.len(), REQUESTS as usize);
        let mut seen = HashMap::new();
        for envelope in &answers {
            let imsi = envelope.payload.imsi().to_string();
            let index = imsis.iter().position(|candidate| *candidate == imsi).unwrap();
            let expected = if index % 3 == 0 {
                S6aResult::Experimental(5001)
            } else {
                S6aResult::Base(BaseResult::Success)
            };
            assert_eq!(envelope.payload.result(), expected);
            *seen.entry(imsi).or_insert(0) += 1;
        }
        assert!(seen.values().all(|count| *count == 1));
        assert_eq!(seen.len(), REQUESTS as usize);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_answer_for_unregistered_task_is_dead_lettered() {
        let Harness {
            bridge,
            bus,
            mme_app,
            ..
        } = harness(S6aProxyConfig::default());
        drop(mme_app);

        bridge
            .submit_update_location_request(&ulr("001010000000006"))
            .unwrap();

        timeout(RECV_LIMIT, async {
            while bus.dead_letters() == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
        assert_eq!(bus.dead_letters(), 1);
    }
}
