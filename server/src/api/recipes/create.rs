use crate::api::{
    chief_scope, json_payload, service_error_response, ErrorResponse, ValidationErrorResponse,
};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ratatouille_core::{CreateRecipe, Recipe, RecipeService, Scope};
use serde_json::Value as JsonValue;

#[utoipa::path(
    post,
    path = "/recipe",
    tag = "recipes",
    summary = "Create a new recipe.",
    request_body = CreateRecipe,
    responses(
        (status = 201, description = "Recipe created successfully", body = Recipe),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(service): State<AppState>,
    body: Bytes,
) -> impl IntoResponse {
    let payload = match json_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    create(&service, &Scope::Global, &payload).await
}

#[utoipa::path(
    post,
    path = "/chief/{chiefId}/recipe",
    tag = "chief recipes",
    summary = "Create a new recipe for a specific chief.",
    params(
        ("chiefId" = String, Path, description = "The ID of the chief")
    ),
    request_body = CreateRecipe,
    responses(
        (status = 201, description = "Recipe created successfully", body = Recipe),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_chief_recipe(
    State(service): State<AppState>,
    Path(chief_id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    let scope = match chief_scope(&chief_id) {
        Ok(scope) => scope,
        Err(response) => return response,
    };
    let payload = match json_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    create(&service, &scope, &payload).await
}

async fn create(service: &RecipeService, scope: &Scope, payload: &JsonValue) -> Response {
    match service.create_recipe(scope, payload).await {
        Ok(recipe) => (StatusCode::CREATED, Json(recipe)).into_response(),
        Err(e) => service_error_response(e, "Failed to create recipe"),
    }
}
