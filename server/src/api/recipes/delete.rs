use crate::api::{
    chief_scope, not_found, service_error_response, ErrorResponse, MessageResponse,
    ValidationErrorResponse,
};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ratatouille_core::{RecipeService, Scope};

#[utoipa::path(
    delete,
    path = "/recipe/{recipeId}",
    tag = "recipes",
    summary = "Delete a recipe by its identity.",
    params(
        ("recipeId" = String, Path, description = "The ID of the recipe")
    ),
    responses(
        (status = 200, description = "Recipe deleted successfully", body = MessageResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(service): State<AppState>,
    Path(recipe_id): Path<String>,
) -> impl IntoResponse {
    delete(&service, &Scope::Global, &recipe_id).await
}

#[utoipa::path(
    delete,
    path = "/chief/{chiefId}/recipe/{recipeId}",
    tag = "chief recipes",
    summary = "Delete a recipe by its identity for a specific chief.",
    params(
        ("chiefId" = String, Path, description = "The ID of the chief"),
        ("recipeId" = String, Path, description = "The ID of the recipe")
    ),
    responses(
        (status = 200, description = "Recipe deleted successfully", body = MessageResponse),
        (status = 400, description = "Invalid chief ID", body = ValidationErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_chief_recipe(
    State(service): State<AppState>,
    Path((chief_id, recipe_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let scope = match chief_scope(&chief_id) {
        Ok(scope) => scope,
        Err(response) => return response,
    };
    delete(&service, &scope, &recipe_id).await
}

async fn delete(service: &RecipeService, scope: &Scope, id: &str) -> Response {
    match service.delete_recipe(scope, id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Recipe deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Ok(false) => not_found(),
        Err(e) => service_error_response(e, "Failed to delete recipe"),
    }
}
