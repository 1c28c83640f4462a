pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use ratatouille_core::{CreateRecipe, Recipe, RecipeSummary, UpdateRecipe};
use utoipa::OpenApi;

pub const RECIPES: &str = "/recipe";
pub const RECIPE: &str = "/recipe/{recipeId}";
pub const CHIEF_RECIPES: &str = "/chief/{chiefId}/recipe";
pub const CHIEF_RECIPE: &str = "/chief/{chiefId}/recipe/{recipeId}";

/// Every path this module routes, for cross-checking the OpenAPI document.
pub const ROUTES: [&str; 4] = [RECIPES, RECIPE, CHIEF_RECIPES, CHIEF_RECIPE];

/// Returns the router for the global and chief-scoped recipe endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            RECIPES,
            get(list::list_recipes).post(create::create_recipe),
        )
        .route(
            RECIPE,
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route(
            CHIEF_RECIPES,
            get(list::list_chief_recipes).post(create::create_chief_recipe),
        )
        .route(
            CHIEF_RECIPE,
            get(get::get_chief_recipe)
                .put(update::update_chief_recipe)
                .delete(delete::delete_chief_recipe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        list::list_chief_recipes,
        create::create_chief_recipe,
        get::get_chief_recipe,
        update::update_chief_recipe,
        delete::delete_chief_recipe,
    ),
    components(schemas(Recipe, RecipeSummary, CreateRecipe, UpdateRecipe))
)]
pub struct ApiDoc;
