use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static AUTH_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("sso_auth_requests_total", "Total auth requests handled")
        .expect("register auth_requests_total")
});

pub static AUTH_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("sso_auth_failures_total", "Total auth requests rejected")
        .expect("register auth_failures_total")
});

/// Text exposition of the default registry.
pub async fn metrics() -> Result<String, (StatusCode, String)> {
    let mut buf = Vec::new();
    let encoder = TextEncoder::new();
    encoder
        .encode(&prometheus::gather(), &mut buf)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    String::from_utf8(buf).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
