use crate::api::{
    chief_scope, json_payload, not_found, service_error_response, ErrorResponse,
    ValidationErrorResponse,
};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ratatouille_core::{Recipe, RecipeService, Scope, UpdateRecipe};
use serde_json::Value as JsonValue;

#[utoipa::path(
    put,
    path = "/recipe/{recipeId}",
    tag = "recipes",
    summary = "Update an existing recipe with new details.",
    params(
        ("recipeId" = String, Path, description = "The ID of the recipe")
    ),
    request_body = UpdateRecipe,
    responses(
        (status = 200, description = "Recipe updated successfully", body = Recipe),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(service): State<AppState>,
    Path(recipe_id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    let payload = match json_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    update(&service, &Scope::Global, &recipe_id, &payload).await
}

#[utoipa::path(
    put,
    path = "/chief/{chiefId}/recipe/{recipeId}",
    tag = "chief recipes",
    summary = "Update an existing recipe with new details for a specific chief.",
    params(
        ("chiefId" = String, Path, description = "The ID of the chief"),
        ("recipeId" = String, Path, description = "The ID of the recipe")
    ),
    request_body = UpdateRecipe,
    responses(
        (status = 200, description = "Recipe updated successfully", body = Recipe),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_chief_recipe(
    State(service): State<AppState>,
    Path((chief_id, recipe_id)): Path<(String, String)>,
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
    update(&service, &scope, &recipe_id, &payload).await
}

async fn update(service: &RecipeService, scope: &Scope, id: &str, payload: &JsonValue) -> Response {
    match service.update_recipe(scope, id, payload).await {
        Ok(Some(recipe)) => (StatusCode::OK, Json(recipe)).into_response(),
        Ok(None) => not_found(),
        Err(e) => service_error_response(e, "Failed to update recipe"),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{send, test_app};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{DateTime, Utc};
    use ratatouille_core::StorageLayout;
    use serde_json::json;
    use tower::ServiceExt;

    fn timestamp(value: &serde_json::Value) -> DateTime<Utc> {
        value.as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_partial_update_merges_and_bumps_updated_at() {
        let (_dir, app) = test_app(StorageLayout::PerRecord);
        let (_, created) = send(
            &app,
            "POST",
            "/recipe",
            Some(json!({"summary": "Soup", "description": "Hot", "steps": ["Boil"]})),
        )
        .await;
        let uri = format!("/recipe/{}", created["id"].as_str().unwrap());

        let (status, updated) = send(&app, "PUT", &uri, Some(json!({"summary": "Cold soup"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["summary"], "Cold soup");
        assert_eq!(updated["description"], created["description"]);
        assert_eq!(updated["steps"], created["steps"]);
        assert_eq!(updated["createdAt"], created["createdAt"]);
        assert!(timestamp(&updated["updatedAt"]) > timestamp(&created["updatedAt"]));

        let (_, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_404_and_changes_nothing() {
        let (_dir, app) = test_app(StorageLayout::SingleFile);
        send(&app, "POST", "/recipe", Some(json!({"summary": "A", "description": "a"}))).await;
        let (_, before) = send(&app, "GET", "/recipe", None).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/recipe/does-not-exist",
            Some(json!({"summary": "B"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Recipe not found"}));
        let (_, after) = send(&app, "GET", "/recipe", None).await;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_invalid_update_is_400() {
        let (_dir, app) = test_app(StorageLayout::PerRecord);
        let (_, created) = send(
            &app,
            "POST",
            "/recipe",
            Some(json!({"summary": "Soup", "description": "Hot"})),
        )
        .await;
        let uri = format!("/recipe/{}", created["id"].as_str().unwrap());

        let (status, body) = send(&app, "PUT", &uri, Some(json!({"description": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"][0]["path"], json!(["description"]));
        assert_eq!(body["details"][0]["code"], "too_small");

        let (_, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_body_parsed_without_content_type() {
        let (_dir, app) = test_app(StorageLayout::SingleFile);
        let (_, created) = send(
            &app,
            "POST",
            "/recipe",
            Some(json!({"summary": "Soup", "description": "Hot"})),
        )
        .await;
        let uri = format!("/recipe/{}", created["id"].as_str().unwrap());

        let request = Request::builder()
            .method("PUT")
            .uri(&uri)
            .body(Body::from(r#"{"summary":"Gazpacho"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (_, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(fetched["summary"], "Gazpacho");
    }

    #[tokio::test]
    async fn test_update_under_chief() {
        let (_dir, app) = test_app(StorageLayout::PerRecord);
        let (_, created) = send(
            &app,
            "POST",
            "/chief/remy/recipe",
            Some(json!({"summary": "Soup", "description": "Hot"})),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/chief/linguini/recipe/{}", id),
            Some(json!({"summary": "Mine now"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/chief/remy/recipe/{}", id),
            Some(json!({"steps": ["Simmer"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["steps"], json!(["Simmer"]));
        assert_eq!(body["summary"], "Soup");
    }
}
