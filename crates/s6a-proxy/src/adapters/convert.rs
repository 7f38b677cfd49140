//! Field conversion between task messages and the remote schema.

use shared_types::{
    Ambr, ApnConfigProfile, ApnConfiguration, AuthenticationInfo, EutranVector, Imsi,
    NetworkAccessMode, PdnType, Plmn, RatType, S6aAuthInfoReq, S6aUpdateLocationReq,
    UpdateLocationData,
};
use tracing::warn;

use crate::domain::{
    AggregatedMaximumBitrate, ApnConfigurationWire, AuthenticationInformationAnswer,
    AuthenticationInformationRequest, EutranVectorWire, PurgeUeRequest, UpdateLocationAnswer,
    UpdateLocationRequest,
};

const RAT_TYPE_EUTRAN: u32 = 1004;
const RAT_TYPE_NR: u32 = 1009;
const NAM_ONLY_PACKET: u32 = 2;

// =============================================================================
// REQUESTS
// =============================================================================

pub fn authentication_info_request(
    imsi: &Imsi,
    request: &S6aAuthInfoReq,
) -> AuthenticationInformationRequest {
    AuthenticationInformationRequest {
        user_name: imsi.as_str().to_owned(),
        visited_plmn: plmn_bytes(request.visited_plmn),
        num_requested_eutran_vectors: u32::from(request.nb_of_vectors),
        immediate_response_preferred: true,
        resync_info: request
            .resync_param
            .map(|param| param.to_vec())
            .unwrap_or_default(),
    }
}

pub fn update_location_request(imsi: &Imsi, request: &S6aUpdateLocationReq) -> UpdateLocationRequest {
    UpdateLocationRequest {
        user_name: imsi.as_str().to_owned(),
        visited_plmn: plmn_bytes(request.visited_plmn),
        skip_subscriber_data: request.skip_subscriber_data,
        initial_attach: request.initial_attach,
        dual_registration_5g_indicator: request.dual_registration_5g,
        rat_type: match request.rat_type {
            RatType::Eutran => RAT_TYPE_EUTRAN,
            RatType::Nr => RAT_TYPE_NR,
        },
    }
}

pub fn purge_request(imsi: &Imsi) -> PurgeUeRequest {
    PurgeUeRequest {
        user_name: imsi.as_str().to_owned(),
    }
}

fn plmn_bytes(plmn: Plmn) -> Vec<u8> {
    plmn.0.to_vec()
}

// =============================================================================
// ANSWERS
// =============================================================================

/// Authentication vectors of a successful answer.
///
/// Vectors whose fixed-size fields have the wrong length are skipped.
pub fn authentication_info(answer: AuthenticationInformationAnswer) -> AuthenticationInfo {
    let eutran_vectors = answer
        .eutran_vectors
        .into_iter()
        .enumerate()
        .filter_map(|(index, vector)| {
            let converted = eutran_vector(&vector);
            if converted.is_none() {
                warn!(
                    index,
                    rand_len = vector.rand.len(),
                    autn_len = vector.autn.len(),
                    kasme_len = vector.kasme.len(),
                    "Skipping malformed E-UTRAN vector"
                );
            }
            converted
        })
        .collect();

    AuthenticationInfo { eutran_vectors }
}

fn eutran_vector(vector: &EutranVectorWire) -> Option<EutranVector> {
    Some(EutranVector {
        rand: vector.rand.as_slice().try_into().ok()?,
        xres: vector.xres.clone(),
        autn: vector.autn.as_slice().try_into().ok()?,
        kasme: vector.kasme.as_slice().try_into().ok()?,
    })
}

/// Subscription data of a successful update-location answer.
pub fn update_location_data(answer: UpdateLocationAnswer) -> UpdateLocationData {
    UpdateLocationData {
        msisdn: answer.msisdn,
        network_access_mode: if answer.network_access_mode == NAM_ONLY_PACKET {
            NetworkAccessMode::OnlyPacket
        } else {
            NetworkAccessMode::PacketAndCircuit
        },
        subscriber_ambr: ambr(answer.total_ambr),
        apn_profile: ApnConfigProfile {
            context_identifier: answer.default_context_id,
            all_apn_conf_ind: answer.all_apns_included,
            apn_configs: answer.apn.into_iter().map(apn_configuration).collect(),
        },
    }
}

fn apn_configuration(apn: ApnConfigurationWire) -> ApnConfiguration {
    ApnConfiguration {
        context_identifier: apn.context_id,
        service_selection: apn.service_selection,
        pdn_type: match apn.pdn {
            1 => PdnType::Ipv6,
            2 => PdnType::Ipv4v6,
            3 => PdnType::Ipv4OrIpv6,
            _ => PdnType::Ipv4,
        },
        qci: apn.qos_class_id,
        priority_level: apn.priority_level,
        ambr: ambr(apn.ambr),
    }
}

fn ambr(wire: AggregatedMaximumBitrate) -> Ambr {
    Ambr {
        max_bandwidth_ul: wire.max_bandwidth_ul,
        max_bandwidth_dl: wire.max_bandwidth_dl,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProtocolErrorCode;

    fn vector(rand_len: usize) -> EutranVectorWire {
        EutranVectorWire {
            rand: vec![1; rand_len],
            xres: vec![2; 8],
            autn: vec![3; 16],
            kasme: vec![4; 32],
        }
    }

    #[test]
    fn test_auth_request_fields() {
        let imsi = Imsi::parse("001010000000001").unwrap();
        let mut resync = [0u8; shared_types::RESYNC_PARAM_LENGTH];
        resync[0] = 0xAA;
        let request = S6aAuthInfoReq {
            imsi: imsi.to_string(),
            imsi_length: 15,
            visited_plmn: Plmn([0x00, 0xF1, 0x10]),
            nb_of_vectors: 2,
            resync_param: Some(resync),
        };

        let wire = authentication_info_request(&imsi, &request);

        assert_eq!(wire.user_name, "001010000000001");
        assert_eq!(wire.visited_plmn, vec![0x00, 0xF1, 0x10]);
        assert_eq!(wire.num_requested_eutran_vectors, 2);
        assert_eq!(wire.resync_info.len(), 30);
        assert_eq!(wire.resync_info[0], 0xAA);
    }

    #[test]
    fn test_malformed_vectors_are_skipped() {
        let answer = AuthenticationInformationAnswer {
            error_code: ProtocolErrorCode::SUCCESS,
            eutran_vectors: vec![vector(16), vector(15), vector(16)],
        };

        let info = authentication_info(answer);

        assert_eq!(info.eutran_vectors.len(), 2);
        assert_eq!(info.eutran_vectors[0].rand, [1; 16]);
        assert_eq!(info.eutran_vectors[0].kasme, [4; 32]);
    }

    #[test]
    fn test_update_location_data() {
        let answer = UpdateLocationAnswer {
            error_code: ProtocolErrorCode::SUCCESS,
            default_context_id: 7,
            total_ambr: AggregatedMaximumBitrate {
                max_bandwidth_ul: 100,
                max_bandwidth_dl: 200,
            },
            all_apns_included: true,
            apn: vec![ApnConfigurationWire {
                context_id: 7,
                service_selection: "internet".to_string(),
                qos_class_id: 9,
                priority_level: 15,
                pdn: 2,
                ..ApnConfigurationWire::default()
            }],
            msisdn: "15551234".to_string(),
            network_access_mode: NAM_ONLY_PACKET,
        };

        let data = update_location_data(answer);

        assert_eq!(data.network_access_mode, NetworkAccessMode::OnlyPacket);
        assert_eq!(data.subscriber_ambr.max_bandwidth_dl, 200);
        assert_eq!(data.apn_profile.context_identifier, 7);
        assert!(data.apn_profile.all_apn_conf_ind);
        assert_eq!(data.apn_profile.apn_configs[0].pdn_type, PdnType::Ipv4v6);
        assert_eq!(data.apn_profile.apn_configs[0].service_selection, "internet");
    }

    #[test]
    fn test_rat_type_codes() {
        let imsi = Imsi::parse("001010000000002").unwrap();
        let request = S6aUpdateLocationReq {
            imsi: imsi.to_string(),
            imsi_length: 15,
            visited_plmn: Plmn([0x00, 0xF1, 0x10]),
            rat_type: RatType::Nr,
            initial_attach: true,
            skip_subscriber_data: false,
            dual_registration_5g: true,
        };

        let wire = update_location_request(&imsi, &request);

        assert_eq!(wire.rat_type, RAT_TYPE_NR);
        assert!(wire.initial_attach);
        assert!(wire.dual_registration_5g_indicator);
    }
}
