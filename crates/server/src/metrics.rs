use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("proverbs_requests_total", "Total HTTP requests handled")
        .expect("register requests_total")
});

pub static CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("proverbs_created_total", "Total proverbs created")
        .expect("register created_total")
});

pub static UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("proverbs_updated_total", "Total proverbs updated")
        .expect("register updated_total")
});

pub static DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("proverbs_deleted_total", "Total proverbs removed by delete requests")
        .expect("register deleted_total")
});

pub static STORE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("proverbs_store_errors_total", "Total requests failed by storage errors")
        .expect("register store_errors_total")
});

/// Middleware: count every request.
pub async fn count_requests(req: Request, next: Next) -> Response {
    REQUESTS_TOTAL.inc();
    next.run(req).await
}

pub fn encode_metrics() -> (StatusCode, String) {
    // touch counters so they show up before their first increment
    Lazy::force(&CREATED_TOTAL);
    Lazy::force(&UPDATED_TOTAL);
    Lazy::force(&DELETED_TOTAL);
    Lazy::force(&STORE_ERRORS_TOTAL);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
