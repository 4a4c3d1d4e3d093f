use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram, CounterVec, Encoder, Histogram, TextEncoder,
};

lazy_static! {
    // Order view metrics
    pub static ref VIEW_REQUESTS: CounterVec = register_counter_vec!(
        "order_view_requests_total",
        "Total number of order view requests served",
        &["status"]
    )
    .expect("metric cannot be created");

    pub static ref VIEW_DURATION: Histogram = register_histogram!(
        "order_view_request_duration_seconds",
        "Order view request duration in seconds",
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("metric cannot be created");
}

/// Helper function to record an order view request outcome
pub fn record_view_request(status: &str, duration_secs: f64) {
    VIEW_REQUESTS.with_label_values(&[status]).inc();
    VIEW_DURATION.observe(duration_secs);
}

/// Gather all metrics in Prometheus text format
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}
