pub mod health;
pub mod openapi;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

pub const HEALTH: &str = "/health";
pub const OPENAPI: &str = "/openapi";

/// Every path this module routes, for cross-checking the OpenAPI document.
pub const ROUTES: [&str; 2] = [HEALTH, OPENAPI];

/// Returns the router for service-level endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route(HEALTH, get(health::health))
        .route(OPENAPI, get(openapi::openapi_document))
}

#[derive(OpenApi)]
#[openapi(
    paths(health::health, openapi::openapi_document),
    components(schemas(health::HealthResponse))
)]
pub struct ApiDoc;
