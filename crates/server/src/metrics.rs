use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "bookstore_requests_total",
        "Total HTTP requests handled, by method and status",
        &["method", "status"]
    )
    .expect("register requests_total")
});

pub static REVIEW_MUTATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "bookstore_review_mutations_total",
        "Successful review mutations, by outcome",
        &["outcome"]
    )
    .expect("register review_mutations_total")
});

pub static GATE_REJECTIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "bookstore_gate_rejections_total",
        "Review mutations rejected for an unknown username"
    )
    .expect("register gate_rejections_total")
});

pub static UPSTREAM_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "bookstore_upstream_errors_total",
        "Failed upstream book API calls, by proxy route",
        &["route"]
    )
    .expect("register upstream_errors_total")
});

/// Middleware counting every response by method and status.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let resp = next.run(req).await;
    REQUESTS_TOTAL
        .with_label_values(&[method.as_str(), resp.status().as_str()])
        .inc();
    resp
}

pub async fn metrics_handler() -> (StatusCode, String) {
    encode_metrics()
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
