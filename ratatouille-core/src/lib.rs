pub mod error;
pub mod repository;
pub mod service;
pub mod types;
pub mod validation;

pub use error::{RepositoryError, ServiceError};
pub use repository::{
    open_repository, FileRecipeRepository, JsonArrayRecipeRepository, RecipeRepository,
    StorageLayout,
};
pub use service::RecipeService;
pub use types::{ChiefId, CreateRecipe, Recipe, RecipeSummary, Scope, UpdateRecipe};
pub use validation::{IssueCode, ValidationError, ValidationIssue};
