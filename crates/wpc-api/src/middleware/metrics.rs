//! # Request Metrics
//!
//! In-process atomic counters reported by `/health`, mirrored into the
//! `metrics` facade so an installed Prometheus recorder exports them too.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Shared metrics state.
#[derive(Debug, Clone)]
pub struct ApiMetrics {
    pub request_count: Arc<AtomicU64>,
    pub error_count: Arc<AtomicU64>,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self {
            request_count: Arc::new(AtomicU64::new(0)),
            error_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Return current request count.
    pub fn requests(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Return current error count.
    pub fn errors(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware that increments request and error counters.
///
/// Any 4xx or 5xx response counts as an error.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();

    let response = next.run(request).await;
    let status = response.status();

    if let Some(m) = metrics {
        m.request_count.fetch_add(1, Ordering::Relaxed);
        if status.is_server_error() || status.is_client_error() {
            m.error_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    metrics::counter!(
        "http_requests_total",
        "method" => method,
        "status" => status.as_u16().to_string()
    )
    .increment(1);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::middleware::from_fn;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn app(metrics: ApiMetrics) -> Router {
        Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/boom", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/gone", get(|| async { StatusCode::NOT_FOUND }))
            .layer(from_fn(metrics_middleware))
            .layer(axum::Extension(metrics))
    }

    async fn hit(metrics: &ApiMetrics, uri: &str) {
        let request = axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap();
        app(metrics.clone()).oneshot(request).await.unwrap();
    }

    #[tokio::test]
    async fn counts_requests_and_errors() {
        let metrics = ApiMetrics::new();
        hit(&metrics, "/ok").await;
        hit(&metrics, "/boom").await;
        hit(&metrics, "/gone").await;
        assert_eq!(metrics.requests(), 3);
        assert_eq!(metrics.errors(), 2);
    }
}
