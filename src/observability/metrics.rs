//! Metrics collection and exposition.
//!
//! # Metrics
//! - `scc_provider_mounts_total` (counter): mounts by outcome (error code or `success`)
//! - `scc_provider_mount_duration_seconds` (histogram): end-to-end mount latency
//! - `scc_provider_fetch_attempts_total` (counter): config server calls by kind, outcome
//! - `scc_provider_files_written_total` (counter): artifacts written to disk
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one mount request.
pub fn record_mount(outcome: &str, started: Instant) {
    counter!("scc_provider_mounts_total", "outcome" => outcome.to_string()).increment(1);
    histogram!("scc_provider_mount_duration_seconds").record(started.elapsed().as_secs_f64());
}

/// Record one HTTP attempt against the config server.
pub fn record_fetch_attempt(kind: &'static str, outcome: &'static str) {
    counter!("scc_provider_fetch_attempts_total", "kind" => kind, "outcome" => outcome)
        .increment(1);
}

pub fn record_file_written() {
    counter!("scc_provider_files_written_total").increment(1);
}
