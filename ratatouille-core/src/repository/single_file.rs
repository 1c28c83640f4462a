use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{read_json, scope_root, write_json_atomic, RecipeRepository};
use crate::error::RepositoryError;
use crate::types::{is_valid_identifier, Recipe, Scope};

/// Stores each scope's recipes as one JSON array in `recipes.json`.
///
/// Global recipes live in `<data_dir>/recipes.json`, a chief's in
/// `<data_dir>/chiefs/<chiefId>/recipes.json`. Listing is insertion order.
#[derive(Debug, Clone)]
pub struct JsonArrayRecipeRepository {
    data_dir: PathBuf,
}

impl JsonArrayRecipeRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn collection_path(&self, scope: &Scope) -> PathBuf {
        scope_root(&self.data_dir, scope).join("recipes.json")
    }

    async fn load(&self, path: &Path) -> Result<Vec<Recipe>, RepositoryError> {
        Ok(read_json(path).await?.unwrap_or_default())
    }
}

#[async_trait]
impl RecipeRepository for JsonArrayRecipeRepository {
    async fn find_all(&self, scope: &Scope) -> Result<Vec<Recipe>, RepositoryError> {
        self.load(&self.collection_path(scope)).await
    }

    async fn find_by_id(&self, scope: &Scope, id: &str) -> Result<Option<Recipe>, RepositoryError> {
        let recipes = self.load(&self.collection_path(scope)).await?;
        Ok(recipes.into_iter().find(|r| r.id == id))
    }

    async fn create(&self, scope: &Scope, recipe: Recipe) -> Result<Recipe, RepositoryError> {
        if !is_valid_identifier(&recipe.id) {
            return Err(RepositoryError::InvalidIdentifier(recipe.id));
        }

        let path = self.collection_path(scope);
        let mut recipes = self.load(&path).await?;

        match recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(existing) => *existing = recipe.clone(),
            None => recipes.push(recipe.clone()),
        }

        write_json_atomic(&path, &recipes).await?;
        tracing::debug!(%scope, id = %recipe.id, count = recipes.len(), "recipe collection written");

        Ok(recipe)
    }

    async fn update(
        &self,
        scope: &Scope,
        id: &str,
        mut recipe: Recipe,
    ) -> Result<Option<Recipe>, RepositoryError> {
        let path = self.collection_path(scope);
        let mut recipes = self.load(&path).await?;

        let Some(existing) = recipes.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        recipe.id = id.to_string();
        *existing = recipe.clone();

        write_json_atomic(&path, &recipes).await?;
        tracing::debug!(%scope, id, "recipe collection written");

        Ok(Some(recipe))
    }

    async fn delete(&self, scope: &Scope, id: &str) -> Result<bool, RepositoryError> {
        let path = self.collection_path(scope);
        let mut recipes = self.load(&path).await?;

        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        if recipes.len() == before {
            return Ok(false);
        }

        write_json_atomic(&path, &recipes).await?;
        tracing::debug!(%scope, id, count = recipes.len(), "recipe collection written");

        Ok(true)
    }
}
