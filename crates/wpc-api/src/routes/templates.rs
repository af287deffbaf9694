//! # Template API
//!
//! Lists, fetches and creates pass templates. The catalogue starts with the
//! built-in templates and lives in memory.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use wpc_core::{check_template, PassData, PassTemplate, PassType};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Request to create a template.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(value_type = String, example = "storeCard")]
    pub pass_type: PassType,
    #[serde(default)]
    pub preview_image: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub configuration: PassData,
    #[serde(default)]
    pub is_public: bool,
}

impl Validate for CreateTemplateRequest {
    fn validate(&self) -> Result<(), String> {
        let errors = check_template(&self.name, self.description.as_deref(), &self.configuration);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join(", "))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTemplatesQuery {
    /// `true` restricts the listing to public templates.
    pub is_public: Option<bool>,
}

/// Build the templates router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/templates", get(list_templates).post(create_template))
        .route("/api/templates/{id}", get(get_template))
}

/// GET /api/templates — List templates, oldest first.
#[utoipa::path(
    get,
    path = "/api/templates",
    params(("isPublic" = Option<bool>, Query, description = "Only public templates when true")),
    responses(
        (status = 200, description = "Templates"),
    ),
    tag = "templates"
)]
pub async fn list_templates(
    State(state): State<AppState>,
    query: Result<Query<ListTemplatesQuery>, QueryRejection>,
) -> Result<Json<Vec<PassTemplate>>, AppError> {
    let Query(query) = query.map_err(|err| AppError::BadRequest(err.body_text()))?;
    let public_only = query.is_public == Some(true);

    let mut templates: Vec<PassTemplate> = state
        .templates
        .list()
        .into_iter()
        .filter(|t| !public_only || t.is_public)
        .collect();
    templates.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

    Ok(Json(templates))
}

/// GET /api/templates/{id} — Fetch one template.
#[utoipa::path(
    get,
    path = "/api/templates/{id}",
    params(("id" = String, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template found"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "templates"
)]
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PassTemplate>, AppError> {
    state
        .templates
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("template {id} not found")))
}

/// POST /api/templates — Create a template.
#[utoipa::path(
    post,
    path = "/api/templates",
    request_body = CreateTemplateRequest,
    responses(
        (status = 201, description = "Template created"),
        (status = 422, description = "Invalid template", body = crate::error::ErrorBody),
    ),
    tag = "templates"
)]
pub async fn create_template(
    State(state): State<AppState>,
    body: Result<Json<CreateTemplateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PassTemplate>), AppError> {
    let req = extract_validated_json(body)?;
    let now = Utc::now();
    let template = PassTemplate {
        id: format!("template-{}", Uuid::new_v4().simple()),
        name: req.name,
        description: req.description,
        pass_type: req.pass_type,
        preview_image: req.preview_image,
        configuration: req.configuration,
        is_public: req.is_public,
        created_at: now,
        updated_at: now,
    };
    state.templates.insert(template.id.clone(), template.clone());
    tracing::info!(template_id = %template.id, name = %template.name, "template created");

    Ok((StatusCode::CREATED, Json(template)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app(state: AppState) -> Router<()> {
        router().with_state(state)
    }

    async fn body_json<T: serde::de::DeserializeOwned>(resp: Response) -> T {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn create(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/templates")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn create_request_validation() {
        let req: CreateTemplateRequest = serde_json::from_value(serde_json::json!({
            "name": "",
            "passType": "coupon",
            "configuration": {"foregroundColor": "nope"}
        }))
        .unwrap();
        let err = req.validate().unwrap_err();
        assert!(err.contains("Template name is required"), "{err}");
        assert!(err.contains("Invalid foreground color format"), "{err}");
    }

    #[tokio::test]
    async fn lists_builtin_templates() {
        let response = test_app(AppState::new()).oneshot(get("/api/templates")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let templates: Vec<PassTemplate> = body_json(response).await;
        let names: Vec<_> = templates.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"Coffee Shop Loyalty Card"));
        assert!(names.contains(&"Event Ticket"));
    }

    #[tokio::test]
    async fn public_filter_hides_private_templates() {
        let state = AppState::new();
        let response = test_app(state.clone())
            .oneshot(create(serde_json::json!({
                "name": "Private Coupon",
                "passType": "coupon",
                "isPublic": false
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let all: Vec<PassTemplate> =
            body_json(test_app(state.clone()).oneshot(get("/api/templates")).await.unwrap()).await;
        assert_eq!(all.len(), 3);

        let public: Vec<PassTemplate> = body_json(
            test_app(state)
                .oneshot(get("/api/templates?isPublic=true"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(public.len(), 2);
        assert!(public.iter().all(|t| t.is_public));
    }

    #[tokio::test]
    async fn create_then_get() {
        let state = AppState::new();
        let response = test_app(state.clone())
            .oneshot(create(serde_json::json!({
                "name": "Gym Membership",
                "description": "Monthly member card",
                "passType": "generic",
                "isPublic": true,
                "configuration": {"backgroundColor": "rgb(10, 20, 30)"}
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: PassTemplate = body_json(response).await;
        assert!(created.id.starts_with("template-"));
        assert_eq!(created.pass_type, PassType::Generic);

        let response = test_app(state)
            .oneshot(get(&format!("/api/templates/{}", created.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched: PassTemplate = body_json(response).await;
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn invalid_template_is_422() {
        let response = test_app(AppState::new())
            .oneshot(create(serde_json::json!({"name": " ", "passType": "generic"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unknown_template_is_404() {
        let response = test_app(AppState::new())
            .oneshot(get("/api/templates/does-not-exist"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
