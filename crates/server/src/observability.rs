use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static GIFT_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gift_list_operations_total",
        "Gift list operations by operation and outcome",
        &["op", "outcome"]
    )
    .expect("register gift_list_operations_total")
});

pub static STORAGE_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "gift_list_storage_failures_total",
        "Operations that failed in the storage unit"
    )
    .expect("register gift_list_storage_failures_total")
});

pub static SEARCH_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gift_list_search_requests_total",
        "Search passthrough requests by outcome",
        &["outcome"]
    )
    .expect("register gift_list_search_requests_total")
});

pub fn record_operation(op: &str, outcome: &str) {
    GIFT_OPERATIONS_TOTAL.with_label_values(&[op, outcome]).inc();
    if outcome == "storage" {
        STORAGE_FAILURES_TOTAL.inc();
    }
}

pub fn record_search(outcome: &str) {
    SEARCH_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
