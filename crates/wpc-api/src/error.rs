//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps validation, assembly, bundling and rendering failures to HTTP status
//! codes with a JSON body of error code, message and optional details.
//! Internal error details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_FAILED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Pass data failed the validator (400). Carries every message in
    /// check order.
    #[error("Validation failed")]
    ValidationFailed(Vec<String>),

    /// Request DTO failed its business rules (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body or query could not be parsed (422).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict with current resource state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Signing or packaging failed (500). Detail is logged only.
    #[error("bundle error: {0}")]
    Bundle(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::ValidationFailed(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Bundle(_) => (StatusCode::INTERNAL_SERVER_ERROR, "BUNDLE_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Construct a not-found error for a pass serial number.
    pub fn pass_not_found(serial_number: &str) -> Self {
        Self::NotFound(format!("pass {serial_number} not found"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Bundle(_) => "Failed to generate pass bundle".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Bundle(_) => tracing::error!(error = %self, "pass bundle generation failed"),
            _ => {}
        }

        let details = match self {
            Self::ValidationFailed(errors) => Some(serde_json::json!({ "errors": errors })),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<wpc_bundle::AssemblyError> for AppError {
    fn from(err: wpc_bundle::AssemblyError) -> Self {
        Self::Internal(format!("pass assembly failed: {err}"))
    }
}

impl From<wpc_bundle::BundleError> for AppError {
    fn from(err: wpc_bundle::BundleError) -> Self {
        Self::Bundle(err.to_string())
    }
}

impl From<wpc_render::RenderError> for AppError {
    fn from(err: wpc_render::RenderError) -> Self {
        match err {
            wpc_render::RenderError::EmptyData => {
                Self::ValidationFailed(vec![wpc_render::RenderError::EmptyData.to_string()])
            }
            other => Self::Internal(format!("QR rendering failed: {other}")),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (AppError::ValidationFailed(vec![]), StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            (AppError::Validation("x".into()), StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            (AppError::BadRequest("x".into()), StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST"),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
            (AppError::Bundle("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "BUNDLE_ERROR"),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code), "{err}");
        }
    }

    #[tokio::test]
    async fn validation_failed_carries_ordered_errors() {
        let err = AppError::ValidationFailed(vec![
            "Description is required".into(),
            "Team identifier is required".into(),
        ]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Validation failed");
        assert_eq!(
            body["error"]["details"]["errors"],
            serde_json::json!(["Description is required", "Team identifier is required"])
        );
    }

    #[tokio::test]
    async fn internal_detail_is_not_leaked() {
        let response = AppError::Internal("db password wrong".into()).into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "An internal error occurred");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn bundle_failure_uses_generic_message() {
        let response = AppError::Bundle("failed to read signer key from /secret".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Failed to generate pass bundle");
        assert!(!body.to_string().contains("/secret"));
    }

    #[test]
    fn empty_render_data_maps_to_validation_failure() {
        let err = AppError::from(wpc_render::RenderError::EmptyData);
        assert!(matches!(err, AppError::ValidationFailed(ref e) if e == &vec!["Data is required".to_string()]));
    }
}
