use crate::api::{
    chief_scope, not_found, service_error_response, ErrorResponse, ValidationErrorResponse,
};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ratatouille_core::{Recipe, RecipeService, Scope};

#[utoipa::path(
    get,
    path = "/recipe/{recipeId}",
    tag = "recipes",
    summary = "Retrieve a recipe by its identity.",
    params(
        ("recipeId" = String, Path, description = "The ID of the recipe")
    ),
    responses(
        (status = 200, description = "Recipe retrieved successfully", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(service): State<AppState>,
    Path(recipe_id): Path<String>,
) -> impl IntoResponse {
    fetch(&service, &Scope::Global, &recipe_id).await
}

#[utoipa::path(
    get,
    path = "/chief/{chiefId}/recipe/{recipeId}",
    tag = "chief recipes",
    summary = "Retrieve a recipe by its identity for a specific chief.",
    params(
        ("chiefId" = String, Path, description = "The ID of the chief"),
        ("recipeId" = String, Path, description = "The ID of the recipe")
    ),
    responses(
        (status = 200, description = "Recipe retrieved successfully", body = Recipe),
        (status = 400, description = "Invalid chief ID", body = ValidationErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_chief_recipe(
    State(service): State<AppState>,
    Path((chief_id, recipe_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let scope = match chief_scope(&chief_id) {
        Ok(scope) => scope,
        Err(response) => return response,
    };
    fetch(&service, &scope, &recipe_id).await
}

async fn fetch(service: &RecipeService, scope: &Scope, id: &str) -> Response {
    match service.get_recipe_by_id(scope, id).await {
        Ok(Some(recipe)) => (StatusCode::OK, Json(recipe)).into_response(),
        Ok(None) => not_found(),
        Err(e) => service_error_response(e, "Failed to fetch recipe"),
    }
}
