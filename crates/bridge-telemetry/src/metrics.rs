//! Prometheus metrics for the MME bridge.
//!
//! All metrics follow the naming convention: `mme_bridge_<component>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., s6a_requests_total)
//! - **Histogram**: Distribution of values (e.g., s6a_answer_latency_seconds)

use lazy_static::lazy_static;
use prometheus::{exponential_buckets, CounterVec, Encoder, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // S6A BRIDGE METRICS
    // =========================================================================

    /// Requests seen by the dispatcher
    pub static ref S6A_REQUESTS: CounterVec = CounterVec::new(
        Opts::new("mme_bridge_s6a_requests_total", "S6a requests by kind and dispatch outcome"),
        &["kind", "outcome"]  // outcome: forwarded/bypassed/rejected
    ).expect("metric creation failed");

    /// Remote answers handled by the completion handler
    pub static ref S6A_ANSWERS: CounterVec = CounterVec::new(
        Opts::new("mme_bridge_s6a_answers_total", "S6a answers by kind and outcome class"),
        &["kind", "outcome"]  // outcome: success/notable_success/error_class/transport_failure
    ).expect("metric creation failed");

    /// Time from dispatch to completion
    pub static ref S6A_ANSWER_LATENCY: HistogramVec = HistogramVec::new(
        prometheus::HistogramOpts::new(
            "mme_bridge_s6a_answer_latency_seconds",
            "Time between dispatching a request and handling its answer"
        ).buckets(exponential_buckets(0.001, 2.0, 15).expect("valid buckets")),
        &["kind"]
    ).expect("metric creation failed");

    /// Logic-error diagnostics (e.g. inconsistent captured identity length)
    pub static ref S6A_LOGIC_ERRORS: CounterVec = CounterVec::new(
        Opts::new("mme_bridge_s6a_logic_errors_total", "Logic-error diagnostics raised by the bridge"),
        &["kind"]
    ).expect("metric creation failed");
}

/// Handle for the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(S6A_REQUESTS.clone()),
        Box::new(S6A_ANSWERS.clone()),
        Box::new(S6A_ANSWER_LATENCY.clone()),
        Box::new(S6A_LOGIC_ERRORS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
