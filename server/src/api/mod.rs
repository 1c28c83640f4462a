pub mod recipes;
pub mod system;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use ratatouille_core::{
    IssueCode, RecipeService, Scope, ServiceError, ValidationError, ValidationIssue,
};
use serde::Serialize;
use serde_json::Value as JsonValue;
use utoipa::{OpenApi, ToSchema};

use crate::AppState;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Returned with 400 when a payload or path parameter fails validation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub details: Vec<ValidationIssue>,
}

/// Plain confirmation message
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Build the full application router. Callers add transport layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(recipes::router())
        .merge(system::router())
        .with_state(state)
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Ratatouille API", version = "1.0.0"),
        components(schemas(ErrorResponse, ValidationErrorResponse, ValidationIssue, IssueCode, MessageResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> =
        vec![system::ApiDoc::openapi(), recipes::ApiDoc::openapi()];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

pub(crate) fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Recipe not found")
}

pub(crate) fn validation_response(err: ValidationError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ValidationErrorResponse {
            error: "Validation failed".to_string(),
            details: err.issues,
        }),
    )
        .into_response()
}

/// Validation failures become 400 with the issue list; anything else is
/// logged and reported as a bare 500 with `message`.
pub(crate) fn service_error_response(err: ServiceError, message: &str) -> Response {
    match err {
        ServiceError::Validation(err) => validation_response(err),
        ServiceError::Repository(e) => {
            tracing::error!(error = %e, "{}", message);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}

/// Resolve a `{chiefId}` path segment, rejecting ids that can't name a namespace.
pub(crate) fn chief_scope(chief_id: &str) -> Result<Scope, Response> {
    RecipeService::chief_scope(chief_id).map_err(|e| service_error_response(e, "Invalid chief"))
}

/// Parse a request body as JSON whatever its `Content-Type`. Only a body that
/// isn't valid JSON becomes a root-level validation issue; buffering failures
/// are rejected earlier by the `Bytes` extractor with their own status.
pub(crate) fn json_payload(body: &[u8]) -> Result<JsonValue, Response> {
    serde_json::from_slice(body).map_err(|e| {
        validation_response(
            ValidationIssue::new(
                Vec::new(),
                IssueCode::InvalidFormat,
                format!("Invalid JSON body: {}", e),
            )
            .into(),
        )
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_covers_every_route() {
        let spec = openapi();
        let mut documented: Vec<&str> = spec.paths.paths.keys().map(String::as_str).collect();
        documented.sort_unstable();

        let mut routed: Vec<&str> = recipes::ROUTES
            .iter()
            .chain(system::ROUTES.iter())
            .copied()
            .collect();
        routed.sort_unstable();

        assert_eq!(documented, routed);
    }

    #[test]
    fn test_openapi_metadata_and_schemas() {
        let spec = openapi();
        assert_eq!(spec.info.title, "Ratatouille API");
        assert_eq!(spec.info.version, "1.0.0");

        let json = serde_json::to_value(&spec).unwrap();
        assert!(json["openapi"].as_str().unwrap().starts_with("3.1"));
        for schema in [
            "Recipe",
            "RecipeSummary",
            "CreateRecipe",
            "UpdateRecipe",
            "ErrorResponse",
            "ValidationErrorResponse",
            "ValidationIssue",
            "MessageResponse",
            "HealthResponse",
        ] {
            assert!(
                json["components"]["schemas"].get(schema).is_some(),
                "missing schema {}",
                schema
            );
        }

        let item = &json["paths"]["/chief/{chiefId}/recipe/{recipeId}"];
        for method in ["get", "put", "delete"] {
            assert!(item.get(method).is_some(), "missing {} operation", method);
        }
    }
}
