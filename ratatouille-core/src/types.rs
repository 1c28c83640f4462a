use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{IssueCode, ValidationError, ValidationIssue};

/// Longest identifier accepted as a path component on disk.
pub const MAX_IDENTIFIER_LEN: usize = 128;

/// Recipe object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique identifier for the recipe
    pub id: String,
    /// A brief summary of the recipe
    #[schema(example = "How to set up a development environment")]
    pub summary: String,
    /// Detailed description of the recipe
    #[schema(example = "This guide walks through setting up a complete development environment...")]
    pub description: String,
    /// List of preconditions that should be met before starting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = json!(["Node.js installed", "Git configured"]))]
    pub preconditions: Option<Vec<String>>,
    /// List of steps to follow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = json!(["Install dependencies", "Configure environment variables", "Run the application"]))]
    pub steps: Option<Vec<String>>,
    /// List of postconditions that should be verified after completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = json!(["Application runs on localhost:3000", "All tests pass"]))]
    pub postconditions: Option<Vec<String>>,
    /// Timestamp when the recipe was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the recipe was last updated
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Build a new record from a validated payload.
    pub fn new(id: String, content: CreateRecipe, now: DateTime<Utc>) -> Self {
        Self {
            id,
            summary: content.summary,
            description: content.description,
            preconditions: content.preconditions,
            steps: content.steps,
            postconditions: content.postconditions,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the provided fields over this record. Omitted fields keep their
    /// current values; timestamps are left alone.
    pub fn apply(&mut self, update: UpdateRecipe) {
        if let Some(summary) = update.summary {
            self.summary = summary;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if update.preconditions.is_some() {
            self.preconditions = update.preconditions;
        }
        if update.steps.is_some() {
            self.steps = update.steps;
        }
        if update.postconditions.is_some() {
            self.postconditions = update.postconditions;
        }
    }
}

/// Recipe list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeSummary {
    /// Unique identifier for the recipe
    pub id: String,
    /// A brief summary of the recipe
    pub summary: String,
}

impl From<Recipe> for RecipeSummary {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            summary: recipe.summary,
        }
    }
}

/// Recipe creation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateRecipe {
    /// A brief summary of the recipe
    #[schema(min_length = 1)]
    pub summary: String,
    /// Detailed description of the recipe
    #[schema(min_length = 1)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preconditions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postconditions: Option<Vec<String>>,
}

/// Recipe update payload. Every field is optional; only the provided ones
/// are merged into the stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateRecipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(min_length = 1)]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(min_length = 1)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preconditions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postconditions: Option<Vec<String>>,
}

/// Identifier of the chief owning a recipe namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChiefId(String);

impl ChiefId {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if is_valid_identifier(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ValidationError::from(ValidationIssue::new(
                vec!["chiefId".to_string()],
                IssueCode::InvalidFormat,
                "Chief ID may only contain letters, digits, '-' and '_'",
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChiefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Namespace a repository operation applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Chief(ChiefId),
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Global => f.write_str("global"),
            Scope::Chief(chief) => write!(f, "chief:{}", chief),
        }
    }
}

/// Identifiers become file and directory names, so only a conservative
/// character set is accepted.
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_IDENTIFIER_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
