use metrics::{register_counter, register_histogram, Counter, Histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Counters and timings for the signing endpoints.
///
/// Handles are registered against the globally installed recorder; when no
/// recorder is installed (unit tests, `sign` CLI runs) they are no-ops.
pub struct Metrics {
    pub urls_signed: Counter,
    pub requests_rejected: Counter,
    pub requests_failed: Counter,
    pub signing_duration: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            urls_signed: register_counter!("screenshot_signer_urls_signed_total"),
            requests_rejected: register_counter!("screenshot_signer_requests_rejected_total"),
            requests_failed: register_counter!("screenshot_signer_requests_failed_total"),
            signing_duration: register_histogram!("screenshot_signer_signing_duration_seconds"),
        }
    }

    pub fn record_signed(&self, count: usize, duration: Duration) {
        self.urls_signed.increment(count as u64);
        self.signing_duration.record(duration.as_secs_f64());
    }

    pub fn record_rejected(&self) {
        self.requests_rejected.increment(1);
    }

    pub fn record_failed(&self) {
        self.requests_failed.increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the Prometheus recorder and return the handle that renders the
/// exposition text for `GET /metrics`.
///
/// Must run before `Metrics::new` so the handles bind to the recorder.
/// Installing twice fails, so the server does this exactly once at startup.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    metrics::set_boxed_recorder(Box::new(recorder))?;
    Ok(handle)
}

/// Handle for rendering metrics without touching the global recorder.
/// Test-side counterpart of `install_prometheus_recorder`.
#[cfg(test)]
pub fn test_prometheus_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_without_recorder_are_noops() {
        let metrics = Metrics::new();
        metrics.record_signed(4, Duration::from_millis(2));
        metrics.record_rejected();
        metrics.record_failed();
    }

    #[test]
    fn test_prometheus_handle_renders() {
        let handle = test_prometheus_handle();
        // Fresh registry; rendering must not panic.
        let _ = handle.render();
    }
}
