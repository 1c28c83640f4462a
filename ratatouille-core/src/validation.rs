//! Payload validation for recipe create/update requests.
//!
//! Payloads arrive as raw JSON so that every violated field can be reported
//! at once instead of stopping at the first deserialization error. Unknown
//! keys (including client-supplied `id`, `createdAt`, `updatedAt`) are ignored.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;
use utoipa::ToSchema;

use crate::types::{CreateRecipe, UpdateRecipe};

const LIST_FIELDS: [&str; 3] = ["preconditions", "steps", "postconditions"];

/// Machine-readable category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    Required,
    InvalidFormat,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationIssue {
    /// Location of the offending value, e.g. `["steps", "2"]`. Empty for the payload root.
    pub path: Vec<String>,
    pub code: IssueCode,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: Vec<String>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path,
            code,
            message: message.into(),
        }
    }

    fn invalid_type(path: Vec<String>, expected: &str, received: &JsonValue) -> Self {
        Self::new(
            path,
            IssueCode::InvalidType,
            format!("Expected {}, received {}", expected, type_name(received)),
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed: {} issue(s)", .issues.len())]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl From<ValidationIssue> for ValidationError {
    fn from(issue: ValidationIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }
}

/// Validate a create payload. `summary` and `description` are required and
/// must not be blank; the list fields are optional arrays of strings.
pub fn validate_create(payload: &JsonValue) -> Result<CreateRecipe, ValidationError> {
    let object = as_object(payload)?;
    let mut issues = Vec::new();

    let summary = required_text(object, "summary", "Summary is required", &mut issues);
    let description = required_text(
        object,
        "description",
        "Description is required",
        &mut issues,
    );
    let [preconditions, steps, postconditions] =
        LIST_FIELDS.map(|key| object.get(key).and_then(|v| text_list(key, v, &mut issues)));

    match (summary, description) {
        (Some(summary), Some(description)) if issues.is_empty() => Ok(CreateRecipe {
            summary,
            description,
            preconditions,
            steps,
            postconditions,
        }),
        _ => Err(ValidationError { issues }),
    }
}

/// Validate a partial update payload. Only the keys present are checked,
/// each with the same rule as on create.
pub fn validate_update(payload: &JsonValue) -> Result<UpdateRecipe, ValidationError> {
    let object = as_object(payload)?;
    let mut issues = Vec::new();

    let summary = object
        .get("summary")
        .and_then(|v| text("summary", v, "Summary is required", &mut issues));
    let description = object
        .get("description")
        .and_then(|v| text("description", v, "Description is required", &mut issues));
    let [preconditions, steps, postconditions] =
        LIST_FIELDS.map(|key| object.get(key).and_then(|v| text_list(key, v, &mut issues)));

    if !issues.is_empty() {
        return Err(ValidationError { issues });
    }

    Ok(UpdateRecipe {
        summary,
        description,
        preconditions,
        steps,
        postconditions,
    })
}

fn as_object(payload: &JsonValue) -> Result<&Map<String, JsonValue>, ValidationError> {
    payload
        .as_object()
        .ok_or_else(|| ValidationIssue::invalid_type(Vec::new(), "object", payload).into())
}

fn required_text(
    object: &Map<String, JsonValue>,
    key: &str,
    blank_message: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match object.get(key) {
        Some(value) => text(key, value, blank_message, issues),
        None => {
            issues.push(ValidationIssue::new(
                vec![key.to_string()],
                IssueCode::Required,
                blank_message,
            ));
            None
        }
    }
}

fn text(
    key: &str,
    value: &JsonValue,
    blank_message: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match value {
        JsonValue::String(s) if s.trim().is_empty() => {
            issues.push(ValidationIssue::new(
                vec![key.to_string()],
                IssueCode::TooSmall,
                blank_message,
            ));
            None
        }
        JsonValue::String(s) => Some(s.clone()),
        other => {
            issues.push(ValidationIssue::invalid_type(
                vec![key.to_string()],
                "string",
                other,
            ));
            None
        }
    }
}

fn text_list(
    key: &str,
    value: &JsonValue,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Vec<String>> {
    let JsonValue::Array(items) = value else {
        issues.push(ValidationIssue::invalid_type(
            vec![key.to_string()],
            "array",
            value,
        ));
        return None;
    };

    let before = issues.len();
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            JsonValue::String(s) => out.push(s.clone()),
            other => issues.push(ValidationIssue::invalid_type(
                vec![key.to_string(), index.to_string()],
                "string",
                other,
            )),
        }
    }

    (issues.len() == before).then_some(out)
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
