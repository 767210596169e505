//! Prometheus metrics setup and metric definitions

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle> {
    // Seconds; includes sub-millisecond buckets for fast endpoints
    let buckets = vec![
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(&buckets)
        .context("failed to set histogram buckets")?
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Register metric descriptions and emit initial zero values so Prometheus output
/// includes HELP/TYPE lines for all metrics from startup.
pub fn describe_metrics() {
    describe_counter!(
        "course_api_http_requests_total",
        "Total number of HTTP requests"
    );
    describe_histogram!(
        "course_api_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "course_api_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );
    describe_counter!(
        "course_api_auth_attempts_total",
        "Basic authentication attempts by result"
    );

    gauge!("course_api_http_requests_in_flight").set(0.0);
    for result in [
        "success",
        "unknown_user",
        "password_mismatch",
        "missing_credentials",
    ] {
        counter!("course_api_auth_attempts_total", "result" => result).absolute(0);
    }
}
