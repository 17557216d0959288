//! Metrics collection and exposition.
//!
//! # Metrics
//! - `site_requests_total` (counter): requests by method, route, status
//! - `site_request_duration_seconds` (histogram): latency by route
//! - `site_csp_nonce_failures_total` (counter): nonce generation skipped
//! - `site_preference_updates_total` (counter): preference writes by dimension
//! - `site_content_reloads_total` (counter): hot reloads by outcome
//!
//! All recorders are no-ops until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    counter!(
        "site_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("site_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_nonce_failure() {
    counter!("site_csp_nonce_failures_total").increment(1);
}

pub fn record_preference_update(dimension: &'static str) {
    counter!("site_preference_updates_total", "dimension" => dimension).increment(1);
}

pub fn record_reload(outcome: &'static str) {
    counter!("site_content_reloads_total", "outcome" => outcome).increment(1);
}
