use crate::election_store::DatasetCounts;
use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all analytics server metrics
const PREFIX: &str = "election_analytics";

lazy_static! {
    // Global Prometheus registry
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
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Metric engine
    pub static ref METRIC_QUERY_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_metric_query_duration_seconds"),
            "Time spent computing one metric, store access included"
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        &["metric"]
    ).expect("Failed to create metric_query_duration_seconds metric");

    // Dataset Metrics
    pub static ref DATASET_ROWS_TOTAL: GaugeVec = GaugeVec::new(
        Opts::new(format!("{PREFIX}_dataset_rows_total"), "Rows per table in the election database"),
        &["table"]
    ).expect("Failed to create dataset_rows_total metric");

    // Error Metrics
    pub static ref ERRORS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_errors_total"), "Total errors by type and endpoint"),
        &["error_type", "endpoint"]
    ).expect("Failed to create errors_total metric");

    pub static ref PROCESS_MEMORY_BYTES: Gauge = Gauge::new(
        format!("{PREFIX}_process_memory_bytes"),
        "Process memory usage in bytes"
    ).expect("Failed to create process_memory_bytes metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(METRIC_QUERY_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(DATASET_ROWS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(ERRORS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(PROCESS_MEMORY_BYTES.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Publish per-table row counts
pub fn init_dataset_metrics(counts: &DatasetCounts) {
    for (table, count) in &counts.counts {
        DATASET_ROWS_TOTAL
            .with_label_values(&[table.as_str()])
            .set(*count as f64);
    }

    tracing::info!(
        "Dataset metrics initialized: {} results in {} tables",
        counts.get("results").unwrap_or(0),
        counts.counts.len()
    );
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record how long a metric took to compute
pub fn record_metric_query(metric: &str, duration: Duration) {
    METRIC_QUERY_DURATION_SECONDS
        .with_label_values(&[metric])
        .observe(duration.as_secs_f64());
}

/// Record an error
pub fn record_error(error_type: &str, endpoint: &str) {
    ERRORS_TOTAL
        .with_label_values(&[error_type, endpoint])
        .inc();
}

/// Update process memory usage
pub fn update_memory_usage() {
    #[cfg(target_os = "linux")]
    {
        if let Ok(status) = std::fs::read_to_string("/proc/self/status") {
            for line in status.lines() {
                if line.starts_with("VmRSS:") {
                    // Parse the RSS (Resident Set Size) in kB
                    if let Some(kb_str) = line.split_whitespace().nth(1) {
                        if let Ok(kb) = kb_str.parse::<f64>() {
                            PROCESS_MEMORY_BYTES.set(kb * 1024.0);
                            return;
                        }
                    }
                }
            }
        }
    }
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    update_memory_usage();

    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
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

    fn has_metric(name: &str) -> bool {
        REGISTRY.gather().iter().any(|m| m.get_name() == name)
    }

    #[test]
    fn test_metrics_initialization() {
        init_metrics();

        let metric_families = REGISTRY.gather();
        assert!(!metric_families.is_empty(), "Metrics should be registered");
    }

    #[test]
    fn test_record_http_request() {
        init_metrics();

        record_http_request("GET", "/v1/analytics/kpis", 200, Duration::from_millis(50));

        assert!(has_metric("election_analytics_http_requests_total"));
    }

    #[test]
    fn test_record_metric_query() {
        init_metrics();

        record_metric_query("seat_share", Duration::from_millis(12));

        let value = METRIC_QUERY_DURATION_SECONDS
            .with_label_values(&["seat_share"])
            .get_sample_count();
        assert!(value >= 1);
        assert!(has_metric("election_analytics_metric_query_duration_seconds"));
    }

    #[test]
    fn test_dataset_metrics() {
        init_metrics();

        init_dataset_metrics(&DatasetCounts {
            counts: vec![("results".to_string(), 8000), ("states".to_string(), 36)],
        });

        assert_eq!(
            DATASET_ROWS_TOTAL.with_label_values(&["results"]).get(),
            8000.0
        );
        assert!(has_metric("election_analytics_dataset_rows_total"));
    }

    #[test]
    fn test_record_error() {
        init_metrics();

        record_error("validation", "kpis");

        assert!(
            ERRORS_TOTAL
                .with_label_values(&["validation", "kpis"])
                .get()
                >= 1.0
        );
    }
}
