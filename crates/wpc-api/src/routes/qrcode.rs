//! # QR Code API
//!
//! Renders barcode text as a PNG or SVG QR image for editor previews.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use wpc_render::{ImageFormat, DEFAULT_SIZE};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Request to render a QR code.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QrCodeRequest {
    /// Text to encode. Required.
    #[serde(default)]
    pub data: Option<String>,
    /// `png` (default) or `svg`.
    #[serde(default)]
    #[schema(value_type = String, example = "png")]
    pub format: ImageFormat,
    /// Edge length in pixels, clamped to 100..=1000. Defaults to 300.
    #[serde(default)]
    pub size: Option<u32>,
}

/// Build the QR code router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/passes/qrcode", post(generate_qrcode))
}

/// POST /api/passes/qrcode — Render a QR code image.
#[utoipa::path(
    post,
    path = "/api/passes/qrcode",
    request_body = QrCodeRequest,
    responses(
        (status = 200, description = "image/png or image/svg+xml"),
        (status = 400, description = "Data is required", body = crate::error::ErrorBody),
    ),
    tag = "passes"
)]
pub async fn generate_qrcode(
    State(state): State<AppState>,
    body: Result<Json<QrCodeRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let req = extract_json(body)?;
    let data = req
        .data
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::ValidationFailed(vec!["Data is required".to_string()]))?;
    let size = req.size.unwrap_or(DEFAULT_SIZE);
    let format = req.format;

    let renderer = state.renderer.clone();
    let image = tokio::task::spawn_blocking(move || renderer.render(&data, size, format)).await??;

    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes).into_response())
}
