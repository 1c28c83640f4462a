use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::{read_json, scope_root, write_json_atomic, RecipeRepository};
use crate::error::RepositoryError;
use crate::types::{is_valid_identifier, Recipe, Scope};

/// Stores each recipe as `<scope>/recipes/<id>.json`.
///
/// Global recipes live under `<data_dir>/recipes/`, a chief's under
/// `<data_dir>/chiefs/<chiefId>/recipes/`. Listing is newest-created first.
#[derive(Debug, Clone)]
pub struct FileRecipeRepository {
    data_dir: PathBuf,
}

impl FileRecipeRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn recipes_dir(&self, scope: &Scope) -> PathBuf {
        scope_root(&self.data_dir, scope).join("recipes")
    }

    /// Path of a record file, or `None` if `id` can't name a file.
    fn record_path(&self, scope: &Scope, id: &str) -> Option<PathBuf> {
        is_valid_identifier(id).then(|| self.recipes_dir(scope).join(format!("{}.json", id)))
    }
}

#[async_trait]
impl RecipeRepository for FileRecipeRepository {
    async fn find_all(&self, scope: &Scope) -> Result<Vec<Recipe>, RepositoryError> {
        let dir = self.recipes_dir(scope);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RepositoryError::io(&dir, e)),
        };

        let mut recipes = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RepositoryError::io(&dir, e))?
        {
            let path = entry.path();
            let is_record = path.extension().map(|e| e == "json").unwrap_or(false)
                && !entry.file_name().to_string_lossy().starts_with('.');
            if !is_record {
                continue;
            }

            // A file deleted between listing and reading is simply gone.
            if let Some(recipe) = read_json::<Recipe>(&path).await? {
                recipes.push(recipe);
            }
        }

        recipes.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(recipes)
    }

    async fn find_by_id(&self, scope: &Scope, id: &str) -> Result<Option<Recipe>, RepositoryError> {
        match self.record_path(scope, id) {
            Some(path) => read_json(&path).await,
            None => Ok(None),
        }
    }

    async fn create(&self, scope: &Scope, recipe: Recipe) -> Result<Recipe, RepositoryError> {
        let path = self
            .record_path(scope, &recipe.id)
            .ok_or_else(|| RepositoryError::InvalidIdentifier(recipe.id.clone()))?;

        write_json_atomic(&path, &recipe).await?;
        tracing::debug!(%scope, id = %recipe.id, "recipe file written");

        Ok(recipe)
    }

    async fn update(
        &self,
        scope: &Scope,
        id: &str,
        mut recipe: Recipe,
    ) -> Result<Option<Recipe>, RepositoryError> {
        let Some(path) = self.record_path(scope, id) else {
            return Ok(None);
        };

        let exists = fs::try_exists(&path)
            .await
            .map_err(|e| RepositoryError::io(&path, e))?;
        if !exists {
            return Ok(None);
        }

        recipe.id = id.to_string();
        write_json_atomic(&path, &recipe).await?;
        tracing::debug!(%scope, id, "recipe file rewritten");

        Ok(Some(recipe))
    }

    async fn delete(&self, scope: &Scope, id: &str) -> Result<bool, RepositoryError> {
        let Some(path) = self.record_path(scope, id) else {
            return Ok(false);
        };

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(%scope, id, "recipe file removed");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(RepositoryError::io(&path, e)),
        }
    }
}
