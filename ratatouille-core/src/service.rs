//! Recipe business logic: validation, id/timestamp assignment, and
//! orchestration of repository calls.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::repository::RecipeRepository;
use crate::types::{ChiefId, Recipe, Scope};
use crate::validation::{validate_create, validate_update};

#[derive(Debug, Clone)]
pub struct RecipeService {
    repository: Arc<dyn RecipeRepository>,
}

impl RecipeService {
    pub fn new(repository: Arc<dyn RecipeRepository>) -> Self {
        Self { repository }
    }

    /// Build the scope for a raw chief id taken from a request path.
    pub fn chief_scope(raw_chief_id: &str) -> Result<Scope, ServiceError> {
        Ok(Scope::Chief(ChiefId::parse(raw_chief_id)?))
    }

    pub async fn get_all_recipes(&self, scope: &Scope) -> Result<Vec<Recipe>, ServiceError> {
        Ok(self.repository.find_all(scope).await?)
    }

    pub async fn get_recipe_by_id(
        &self,
        scope: &Scope,
        id: &str,
    ) -> Result<Option<Recipe>, ServiceError> {
        Ok(self.repository.find_by_id(scope, id).await?)
    }

    /// Validate the payload and store it as a new record with a fresh id and
    /// `createdAt == updatedAt == now`.
    pub async fn create_recipe(
        &self,
        scope: &Scope,
        payload: &JsonValue,
    ) -> Result<Recipe, ServiceError> {
        let content = validate_create(payload)?;
        let recipe = Recipe::new(Uuid::new_v4().to_string(), content, Utc::now());

        let created = self.repository.create(scope, recipe).await?;
        tracing::info!(%scope, id = %created.id, "recipe created");

        Ok(created)
    }

    /// Validate the payload, then merge it over the stored record. Returns
    /// `None` when no record has this id.
    pub async fn update_recipe(
        &self,
        scope: &Scope,
        id: &str,
        payload: &JsonValue,
    ) -> Result<Option<Recipe>, ServiceError> {
        let changes = validate_update(payload)?;

        let Some(mut recipe) = self.repository.find_by_id(scope, id).await? else {
            return Ok(None);
        };

        recipe.apply(changes);
        recipe.updated_at = next_updated_at(recipe.updated_at, Utc::now());

        let updated = self.repository.update(scope, id, recipe).await?;
        if updated.is_some() {
            tracing::info!(%scope, id, "recipe updated");
        }

        Ok(updated)
    }

    pub async fn delete_recipe(&self, scope: &Scope, id: &str) -> Result<bool, ServiceError> {
        let deleted = self.repository.delete(scope, id).await?;
        if deleted {
            tracing::info!(%scope, id, "recipe deleted");
        }
        Ok(deleted)
    }
}

/// `updatedAt` must move forward on every update even if the clock hasn't.
fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::FileRecipeRepository;
    use crate::validation::IssueCode;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::TempDir;

    fn service(temp_dir: &TempDir) -> RecipeService {
        RecipeService::new(Arc::new(FileRecipeRepository::new(temp_dir.path())))
    }

    #[test]
    fn test_next_updated_at_is_strictly_increasing() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        assert_eq!(next_updated_at(t, t + Duration::seconds(1)), t + Duration::seconds(1));
        assert_eq!(next_updated_at(t, t), t + Duration::milliseconds(1));
        assert_eq!(
            next_updated_at(t, t - Duration::seconds(5)),
            t + Duration::milliseconds(1)
        );
    }

    #[test]
    fn test_chief_scope_validates() {
        assert_eq!(
            RecipeService::chief_scope("remy").unwrap(),
            Scope::Chief(ChiefId::parse("remy").unwrap())
        );
        match RecipeService::chief_scope("a b") {
            Err(ServiceError::Validation(err)) => {
                assert_eq!(err.issues[0].code, IssueCode::InvalidFormat)
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let created = service
            .create_recipe(
                &Scope::Global,
                &json!({
                    "id": "client",
                    "createdAt": "1999-01-01T00:00:00Z",
                    "updatedAt": "1999-01-01T00:00:00Z",
                    "summary": "Soup",
                    "description": "Hot"
                }),
            )
            .await
            .unwrap();

        assert_ne!(created.id, "client");
        assert!(Uuid::parse_str(&created.id).is_ok());
        assert_eq!(created.created_at, created.updated_at);
        assert!(created.created_at > Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_create_validation_failure_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let err = service
            .create_recipe(&Scope::Global, &json!({"summary": "Test"}))
            .await
            .unwrap_err();
        match err {
            ServiceError::Validation(v) => assert_eq!(v.issues[0].path, vec!["description"]),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(!temp_dir.path().join("recipes").exists());
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let err = service
            .update_recipe(&Scope::Global, "missing", &json!({"summary": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let missing = service
            .update_recipe(&Scope::Global, "missing", &json!({"summary": "x"}))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let created = service
            .create_recipe(
                &Scope::Global,
                &json!({
                    "summary": "Soup",
                    "description": "Hot",
                    "steps": ["Boil", "Serve"]
                }),
            )
            .await
            .unwrap();

        let updated = service
            .update_recipe(&Scope::Global, &created.id, &json!({"summary": "Cold soup"}))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.summary, "Cold soup");
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.steps, created.steps);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_delete_is_true_then_false() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let created = service
            .create_recipe(&Scope::Global, &json!({"summary": "a", "description": "b"}))
            .await
            .unwrap();

        assert!(service.delete_recipe(&Scope::Global, &created.id).await.unwrap());
        assert!(!service.delete_recipe(&Scope::Global, &created.id).await.unwrap());
    }
}
