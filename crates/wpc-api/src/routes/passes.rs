//! # Pass API
//!
//! Create, validate, list, fetch, delete and download passes.
//!
//! Creation fills a blank serial number, runs the validator, checks that the
//! pass assembles, and stores it under its serial number. A serial number that is already stored is
//! refused with 409 rather than overwritten.
//!
//! Download assembles the stored pass and signs it when certificates are
//! configured. Without certificates it returns the raw pass JSON marked with
//! `x-pass-bundle: unsigned`; that response cannot be installed in Wallet.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use wpc_bundle::{
    assemble, BundleError, BundleProducer, PkPassProducer, SigningCertificates,
    PKPASS_CONTENT_TYPE,
};
use wpc_core::{serial, validate, ImageSet, PassData, PassType, ValidationReport};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_query, Validate};
use crate::repository::{RepositoryError, StoredPass};
use crate::state::AppState;

/// Response header marking a degraded, unsigned download.
pub const PASS_BUNDLE_HEADER: &str = "x-pass-bundle";

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 100;

/// Request to create a pass.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePassRequest {
    #[schema(value_type = String, example = "storeCard")]
    pub pass_type: PassType,
    #[schema(value_type = Object)]
    pub pass_data: PassData,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub images: Option<ImageSet>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePassResponse {
    pub pass_id: Uuid,
    pub serial_number: String,
    pub download_url: String,
}

/// Validator outcome returned for live feedback.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl From<ValidationReport> for ValidationResponse {
    fn from(report: ValidationReport) -> Self {
        Self {
            valid: report.valid,
            errors: report.errors,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListPassesQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl Validate for ListPassesQuery {
    fn validate(&self) -> Result<(), String> {
        if self.page == Some(0) {
            return Err("page must be at least 1".to_string());
        }
        match self.limit {
            Some(0) => Err("limit must be at least 1".to_string()),
            Some(l) if l > MAX_LIMIT => Err(format!("limit must not exceed {MAX_LIMIT}")),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassSummary {
    pub serial_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub pass_type: PassType,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListPassesResponse {
    pub passes: Vec<PassSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassDetail {
    pub serial_number: String,
    pub status: String,
    #[schema(value_type = String)]
    pub pass_type: PassType,
    #[schema(value_type = Object)]
    pub pass_data: PassData,
}

/// Build the passes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/passes", get(list_passes).post(create_pass))
        .route("/api/passes/validate", post(validate_pass))
        .route("/api/passes/download/{serial_number}", get(download_pass))
        .route(
            "/api/passes/{serial_number}",
            get(get_pass).delete(delete_pass),
        )
}

/// POST /api/passes — Validate and store a new pass.
#[utoipa::path(
    post,
    path = "/api/passes",
    request_body = CreatePassRequest,
    responses(
        (status = 201, description = "Pass created", body = CreatePassResponse),
        (status = 400, description = "Pass data failed validation", body = crate::error::ErrorBody),
        (status = 409, description = "Serial number already in use", body = crate::error::ErrorBody),
    ),
    tag = "passes"
)]
pub async fn create_pass(
    State(state): State<AppState>,
    body: Result<Json<CreatePassRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePassResponse>), AppError> {
    let CreatePassRequest {
        pass_type,
        mut pass_data,
        images,
    } = extract_json(body)?;

    let serial_number = pass_data.ensure_serial_number(serial::generate).to_string();
    validate(&pass_data)
        .into_result()
        .map_err(AppError::ValidationFailed)?;
    assemble(&pass_data, pass_type, images.as_ref())?;

    let pass_id = Uuid::new_v4();
    let record = StoredPass {
        pass_id,
        serial_number: serial_number.clone(),
        pass_type,
        pass_data,
        images,
        created_at: Utc::now(),
    };
    state
        .passes
        .insert_new(&serial_number, record)
        .map_err(|RepositoryError::AlreadyExists(serial)| {
            AppError::Conflict(format!("pass with serial number {serial} already exists"))
        })?;

    tracing::info!(%pass_id, %serial_number, pass_type = %pass_type, "pass created");

    Ok((
        StatusCode::CREATED,
        Json(CreatePassResponse {
            pass_id,
            download_url: format!("/api/passes/download/{serial_number}"),
            serial_number,
        }),
    ))
}

/// POST /api/passes/validate — Run the validator without storing anything.
#[utoipa::path(
    post,
    path = "/api/passes/validate",
    request_body = Object,
    responses(
        (status = 200, description = "Validation outcome", body = ValidationResponse),
    ),
    tag = "passes"
)]
pub async fn validate_pass(
    body: Result<Json<PassData>, JsonRejection>,
) -> Result<Json<ValidationResponse>, AppError> {
    let pass_data = extract_json(body)?;
    Ok(Json(validate(&pass_data).into()))
}

/// GET /api/passes — List stored passes, oldest first.
#[utoipa::path(
    get,
    path = "/api/passes",
    params(
        ("page" = Option<usize>, Query, description = "1-based page number (default 1)"),
        ("limit" = Option<usize>, Query, description = "Page size, 1-100 (default 10)"),
    ),
    responses(
        (status = 200, description = "One page of passes", body = ListPassesResponse),
    ),
    tag = "passes"
)]
pub async fn list_passes(
    State(state): State<AppState>,
    query: Result<Query<ListPassesQuery>, QueryRejection>,
) -> Result<Json<ListPassesResponse>, AppError> {
    let query = extract_validated_query(query)?;
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let result = state.passes.list(page, limit);
    let passes = result
        .items
        .into_iter()
        .map(|p| PassSummary {
            serial_number: p.serial_number,
            description: p.pass_data.description,
            pass_type: p.pass_type,
        })
        .collect();

    Ok(Json(ListPassesResponse {
        passes,
        pagination: Pagination {
            page,
            limit,
            total: result.total,
        },
    }))
}

/// GET /api/passes/{serialNumber} — Fetch a stored pass.
#[utoipa::path(
    get,
    path = "/api/passes/{serial_number}",
    params(("serial_number" = String, Path, description = "Pass serial number")),
    responses(
        (status = 200, description = "Pass found", body = PassDetail),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "passes"
)]
pub async fn get_pass(
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
) -> Result<Json<PassDetail>, AppError> {
    let stored = state
        .passes
        .get(&serial_number)
        .ok_or_else(|| AppError::pass_not_found(&serial_number))?;

    Ok(Json(PassDetail {
        serial_number: stored.serial_number,
        status: "active".to_string(),
        pass_type: stored.pass_type,
        pass_data: stored.pass_data,
    }))
}

/// DELETE /api/passes/{serialNumber} — Remove a stored pass.
#[utoipa::path(
    delete,
    path = "/api/passes/{serial_number}",
    params(("serial_number" = String, Path, description = "Pass serial number")),
    responses(
        (status = 204, description = "Pass deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "passes"
)]
pub async fn delete_pass(
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .passes
        .delete(&serial_number)
        .ok_or_else(|| AppError::pass_not_found(&serial_number))?;
    tracing::info!(%serial_number, "pass deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/passes/download/{serialNumber} — Signed `.pkpass` bundle.
#[utoipa::path(
    get,
    path = "/api/passes/download/{serial_number}",
    params(("serial_number" = String, Path, description = "Pass serial number")),
    responses(
        (status = 200, description = "Signed application/vnd.apple.pkpass bundle, or unsigned pass JSON when certificates are not configured"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 500, description = "Bundle generation failed", body = crate::error::ErrorBody),
    ),
    tag = "passes"
)]
pub async fn download_pass(
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
) -> Result<Response, AppError> {
    let stored = state
        .passes
        .get(&serial_number)
        .ok_or_else(|| AppError::pass_not_found(&serial_number))?;

    let Some(paths) = state.config.certificates.clone() else {
        tracing::warn!(
            %serial_number,
            "certificates not configured, returning unsigned pass JSON instead of .pkpass"
        );
        return Ok(([(PASS_BUNDLE_HEADER, "unsigned")], Json(stored.pass_data)).into_response());
    };

    let record = assemble(&stored.pass_data, stored.pass_type, stored.images.as_ref())?;

    let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, BundleError> {
        let certificates = SigningCertificates::load(&paths)?;
        PkPassProducer::new(certificates).produce(&record)
    })
    .await??;

    tracing::info!(%serial_number, bytes = bytes.len(), "pass bundle generated");

    Ok((
        [
            (header::CONTENT_TYPE, PKPASS_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{serial_number}.pkpass\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
