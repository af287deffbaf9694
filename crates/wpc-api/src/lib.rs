//! # wpc-api — Axum API Service for the Wallet Pass Creator
//!
//! ## API Surface
//!
//! | Prefix              | Module                  | Domain                    |
//! |---------------------|-------------------------|---------------------------|
//! | `/api/passes/*`     | [`routes::passes`]      | Pass lifecycle & download |
//! | `/api/passes/qrcode`| [`routes::qrcode`]      | QR previews               |
//! | `/api/templates/*`  | [`routes::templates`]   | Template catalogue        |
//! | `/health`, `/api`   | [`routes::health`]      | Health & discovery        |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! ## OpenAPI
//!
//! Generated via utoipa derive macros at `/openapi.json`.

pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// CORS for the editor origin, with credentials.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);
    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(%frontend_url, "FRONTEND_URL is not a valid origin, CORS disabled");
            layer
        }
    }
}

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let cors = cors_layer(&state.config.frontend_url);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::passes::router())
        .merge(routes::qrcode::router())
        .merge(routes::templates::router())
        .merge(openapi::router())
        .fallback(routes::health::not_found)
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(metrics))
        .layer(cors)
        .with_state(state)
}
