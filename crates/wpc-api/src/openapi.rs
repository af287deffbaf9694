//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wallet Pass Creator API",
        version = "0.1.0",
        description = "Design, validate, store and download signed Apple Wallet passes.",
        license(name = "MIT")
    ),
    paths(
        // Passes
        crate::routes::passes::create_pass,
        crate::routes::passes::validate_pass,
        crate::routes::passes::list_passes,
        crate::routes::passes::get_pass,
        crate::routes::passes::delete_pass,
        crate::routes::passes::download_pass,
        crate::routes::qrcode::generate_qrcode,
        // Templates
        crate::routes::templates::list_templates,
        crate::routes::templates::get_template,
        crate::routes::templates::create_template,
        // Service
        crate::routes::health::health,
        crate::routes::health::index,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::passes::CreatePassRequest,
        crate::routes::passes::CreatePassResponse,
        crate::routes::passes::ValidationResponse,
        crate::routes::passes::PassSummary,
        crate::routes::passes::Pagination,
        crate::routes::passes::ListPassesResponse,
        crate::routes::passes::PassDetail,
        crate::routes::qrcode::QrCodeRequest,
        crate::routes::templates::CreateTemplateRequest,
        crate::routes::health::HealthResponse,
    )),
    tags(
        (name = "passes", description = "Pass creation, validation and download"),
        (name = "templates", description = "Pass templates"),
        (name = "service", description = "Health and discovery"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
