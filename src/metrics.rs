//! In-process counters for probe traffic.
//!
//! Recorded through the `metrics` facade. No exporter is installed here, so
//! the counters are no-ops unless the embedding process installs a recorder.

use axum::http::StatusCode;
use metrics::{counter, describe_counter};

use crate::probe::{FeatureOutcome, Probe};

// === Metric Name Constants ===

/// Probe requests counter metric name.
pub const METRIC_PROBE_REQUESTS: &str = "probe_requests_total";
/// Feature draws counter metric name.
pub const METRIC_FEATURE_DRAWS: &str = "feature_draws_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_PROBE_REQUESTS,
        "Total probe requests by endpoint and response status"
    );
    describe_counter!(
        METRIC_FEATURE_DRAWS,
        "Total new-feature evaluations by outcome"
    );
}

/// Count one probe response.
pub fn record_probe(probe: Probe, status: StatusCode) {
    let probe: &'static str = probe.into();
    counter!(
        METRIC_PROBE_REQUESTS,
        "probe" => probe,
        "status" => status.as_u16().to_string()
    )
    .increment(1);
}

/// Count one feature evaluation.
pub fn record_feature(outcome: FeatureOutcome) {
    counter!(METRIC_FEATURE_DRAWS, "outcome" => outcome.to_string()).increment(1);
}
