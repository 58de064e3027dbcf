//! Metrics collection and Prometheus export.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!("Failed to install Prometheus recorder: {}", e),
    }
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

fn outcome(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}

pub fn record_submission(success: bool) {
    counter!("forms_submitted_total", "outcome" => outcome(success)).increment(1);
}

pub fn record_fetch(success: bool) {
    counter!("forms_fetched_total", "outcome" => outcome(success)).increment(1);
}

/// `matched` distinguishes deletes that removed a document from misses.
pub fn record_delete(success: bool, matched: bool) {
    counter!(
        "forms_deleted_total",
        "outcome" => outcome(success),
        "matched" => if matched { "true" } else { "false" }
    )
    .increment(1);
}
