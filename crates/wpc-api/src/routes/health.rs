//! # Service Endpoints
//!
//! Health, API index, Prometheus scrape, and the JSON 404 fallback.

use axum::extract::State;
use axum::http::{header, Method, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub requests: u64,
    pub errors: u64,
}

/// Build the service router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api", get(index))
        .route("/metrics", get(prometheus_metrics))
}

/// GET /health — Liveness with request counters.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "service"
)]
pub async fn health(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        environment: state.config.environment.clone(),
        requests: metrics.requests(),
        errors: metrics.errors(),
    })
}

/// GET /api — Endpoint index.
#[utoipa::path(
    get,
    path = "/api",
    responses((status = 200, description = "Service name, version and endpoints")),
    tag = "service"
)]
pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Wallet Pass Creator API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "passes": "/api/passes",
            "templates": "/api/templates",
            "health": "/health",
            "openapi": "/openapi.json",
        },
    }))
}

/// GET /metrics — Prometheus text exposition, when a recorder is installed.
pub async fn prometheus_metrics(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let handle = state
        .prometheus
        .as_ref()
        .ok_or_else(|| AppError::NotFound("metrics recorder not installed".to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}

/// Fallback for unmatched routes.
pub async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {method} {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app(metrics: ApiMetrics) -> Router<()> {
        router()
            .fallback(not_found)
            .layer(Extension(metrics))
            .with_state(AppState::new())
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_reports_environment_and_counters() {
        let metrics = ApiMetrics::new();
        metrics.request_count.fetch_add(4, std::sync::atomic::Ordering::Relaxed);
        let response = test_app(metrics).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["environment"], "development");
        assert_eq!(body["requests"], 4);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn index_lists_endpoints() {
        let response = test_app(ApiMetrics::new()).oneshot(get("/api")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["message"], "Wallet Pass Creator API");
        assert_eq!(body["endpoints"]["passes"], "/api/passes");
    }

    #[tokio::test]
    async fn metrics_without_recorder_is_404() {
        let response = test_app(ApiMetrics::new()).oneshot(get("/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn fallback_is_json_404() {
        let response = test_app(ApiMetrics::new()).oneshot(get("/nowhere")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "not found: no route for GET /nowhere");
    }
}
