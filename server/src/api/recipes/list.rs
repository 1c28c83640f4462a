use crate::api::{chief_scope, service_error_response, ErrorResponse, ValidationErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ratatouille_core::{RecipeService, RecipeSummary, Scope};

#[utoipa::path(
    get,
    path = "/recipe",
    tag = "recipes",
    summary = "Retrieve a list of all recipes.",
    responses(
        (status = 200, description = "Recipes retrieved successfully", body = Vec<RecipeSummary>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_recipes(State(service): State<AppState>) -> impl IntoResponse {
    list(&service, &Scope::Global).await
}

#[utoipa::path(
    get,
    path = "/chief/{chiefId}/recipe",
    tag = "chief recipes",
    summary = "Retrieve a list of all recipes for a specific chief.",
    params(
        ("chiefId" = String, Path, description = "The ID of the chief")
    ),
    responses(
        (status = 200, description = "Recipes retrieved successfully", body = Vec<RecipeSummary>),
        (status = 400, description = "Invalid chief ID", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_chief_recipes(
    State(service): State<AppState>,
    Path(chief_id): Path<String>,
) -> impl IntoResponse {
    let scope = match chief_scope(&chief_id) {
        Ok(scope) => scope,
        Err(response) => return response,
    };
    list(&service, &scope).await
}

async fn list(service: &RecipeService, scope: &Scope) -> Response {
    match service.get_all_recipes(scope).await {
        Ok(recipes) => {
            let summaries: Vec<RecipeSummary> =
                recipes.into_iter().map(RecipeSummary::from).collect();
            (StatusCode::OK, Json(summaries)).into_response()
        }
        Err(e) => service_error_response(e, "Failed to fetch recipes"),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{send, test_app};
    use axum::http::StatusCode;
    use ratatouille_core::StorageLayout;
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_list_before_any_writes() {
        let (dir, app) = test_app(StorageLayout::PerRecord);
        let (status, body) = send(&app, "GET", "/recipe", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
        assert!(!dir.path().join("data").exists());
    }

    #[tokio::test]
    async fn test_list_returns_summaries_only() {
        let (_dir, app) = test_app(StorageLayout::PerRecord);
        let (_, created) = send(
            &app,
            "POST",
            "/recipe",
            Some(json!({"summary": "Soup", "description": "Hot", "steps": ["Boil"]})),
        )
        .await;

        let (status, body) = send(&app, "GET", "/recipe", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"id": created["id"], "summary": "Soup"}]));
    }

    #[tokio::test]
    async fn test_created_id_listed_exactly_once() {
        for layout in [StorageLayout::PerRecord, StorageLayout::SingleFile] {
            let (_dir, app) = test_app(layout);
            send(&app, "POST", "/recipe", Some(json!({"summary": "A", "description": "a"}))).await;
            let (_, created) = send(
                &app,
                "POST",
                "/recipe",
                Some(json!({"summary": "B", "description": "b"})),
            )
            .await;

            let (_, body) = send(&app, "GET", "/recipe", None).await;
            let matches = body
                .as_array()
                .unwrap()
                .iter()
                .filter(|entry| entry["id"] == created["id"])
                .count();
            assert_eq!(matches, 1, "layout {}", layout);
        }
    }

    #[tokio::test]
    async fn test_corrupt_storage_is_a_generic_500() {
        let (dir, app) = test_app(StorageLayout::SingleFile);
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data").join("recipes.json"), "not json").unwrap();

        let (status, body) = send(&app, "GET", "/recipe", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to fetch recipes"}));
    }

    #[tokio::test]
    async fn test_invalid_chief_is_a_validation_error() {
        let (_dir, app) = test_app(StorageLayout::PerRecord);
        let (status, body) = send(&app, "GET", "/chief/bad%20chief/recipe", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"][0]["path"], json!(["chiefId"]));
    }
}
