use axum::{response::IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/openapi",
    tag = "system",
    summary = "Retrieve the OpenAPI specification.",
    responses(
        (status = 200, description = "OpenAPI specification retrieved successfully")
    )
)]
pub async fn openapi_document() -> impl IntoResponse {
    Json(crate::api::openapi())
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{send, test_app};
    use axum::http::StatusCode;
    use ratatouille_core::StorageLayout;

    #[tokio::test]
    async fn test_serves_document_describing_itself() {
        let (_dir, app) = test_app(StorageLayout::PerRecord);
        let (status, body) = send(&app, "GET", "/openapi", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "Ratatouille API");
        assert!(body["paths"]["/openapi"]["get"].is_object());
        assert!(body["paths"]["/recipe"]["post"].is_object());
    }
}
