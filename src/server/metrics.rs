use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, Histogram, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all dashboard metrics
const PREFIX: &str = "trends_dashboard";

/// Paths with their own label; everything else (static files, 404s) is "other".
const KNOWN_PATHS: [&str; 4] = [
    "/",
    "/v1/analysis",
    "/v1/analysis/raw",
    "/v1/metrics/video",
];

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0, 120.0, 300.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Analysis Service Metrics
    pub static ref ANALYSIS_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_analysis_requests_total"), "Analysis service calls by outcome"),
        &["outcome"]
    ).expect("Failed to create analysis_requests_total metric");

    pub static ref ANALYSIS_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            format!("{PREFIX}_analysis_duration_seconds"),
            "Analysis service call duration in seconds"
        )
        .buckets(vec![1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 180.0, 300.0])
    ).expect("Failed to create analysis_duration_seconds metric");

    pub static ref ACTIVE_SESSIONS: Gauge = Gauge::new(
        format!("{PREFIX}_active_sessions"),
        "Number of dashboard sessions held in memory"
    ).expect("Failed to create active_sessions metric");

    // Error Metrics
    pub static ref ERRORS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_errors_total"), "Total errors by type and endpoint"),
        &["error_type", "endpoint"]
    ).expect("Failed to create errors_total metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(ANALYSIS_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(ANALYSIS_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(ACTIVE_SESSIONS.clone()));
    let _ = REGISTRY.register(Box::new(ERRORS_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Collapses a request path into a bounded label value.
pub fn categorize_endpoint(path: &str) -> &'static str {
    KNOWN_PATHS
        .iter()
        .find(|known| **known == path)
        .copied()
        .unwrap_or("other")
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let path = categorize_endpoint(path);
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record one call to the analysis service
pub fn record_analysis(outcome: &str, duration: Duration) {
    ANALYSIS_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
    ANALYSIS_DURATION_SECONDS.observe(duration.as_secs_f64());
}

pub fn set_active_sessions(count: usize) {
    ACTIVE_SESSIONS.set(count as f64);
}

/// Record an error
pub fn record_error(error_type: &str, endpoint: &str) {
    ERRORS_TOTAL
        .with_label_values(&[error_type, endpoint])
        .inc();
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_default();
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_family(name: &str) -> bool {
        REGISTRY
            .gather()
            .iter()
            .any(|m| m.get_name() == format!("{PREFIX}_{name}"))
    }

    #[test]
    fn test_categorize_endpoint() {
        assert_eq!(categorize_endpoint("/v1/analysis"), "/v1/analysis");
        assert_eq!(categorize_endpoint("/v1/analysis/raw"), "/v1/analysis/raw");
        assert_eq!(categorize_endpoint("/assets/app.js"), "other");
    }

    #[test]
    fn test_record_http_request() {
        init_metrics();

        record_http_request("GET", "/v1/analysis", 200, Duration::from_millis(50));

        assert!(has_family("http_requests_total"));
        assert!(has_family("http_request_duration_seconds"));
    }

    #[test]
    fn test_record_analysis() {
        init_metrics();

        record_analysis("success", Duration::from_secs(42));
        record_analysis("timeout", Duration::from_secs(300));

        assert!(has_family("analysis_requests_total"));
        let count = ANALYSIS_REQUESTS_TOTAL
            .with_label_values(&["success"])
            .get();
        assert!(count >= 1.0);
    }

    #[test]
    fn test_record_error() {
        init_metrics();

        record_error("upstream", "/v1/analysis");

        assert!(has_family("errors_total"));
    }
}
