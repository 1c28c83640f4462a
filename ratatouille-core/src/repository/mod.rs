//! File-backed recipe storage.
//!
//! Two layouts are available behind the [`RecipeRepository`] trait:
//! - [`FileRecipeRepository`]: one `<id>.json` file per record, listed newest-first
//! - [`JsonArrayRecipeRepository`]: a single `recipes.json` array per scope, listed in insertion order
//!
//! Neither keeps anything in memory between calls. Every operation re-reads
//! the current on-disk state, and every write replaces its target file via a
//! temp file + rename so a reader never sees a half-written record.

mod per_record;
mod single_file;

pub use per_record::FileRecipeRepository;
pub use single_file::JsonArrayRecipeRepository;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::types::{Recipe, Scope};

/// Storage contract for recipe records.
///
/// Absence is never an error: lookups return `None`, deletes return `false`,
/// and a scope whose storage was never written lists as empty. Identifier
/// collisions on `create` overwrite silently; the service is the only caller
/// and always generates fresh ids.
#[async_trait]
pub trait RecipeRepository: Send + Sync + std::fmt::Debug {
    /// All records in the scope.
    async fn find_all(&self, scope: &Scope) -> Result<Vec<Recipe>, RepositoryError>;

    async fn find_by_id(&self, scope: &Scope, id: &str) -> Result<Option<Recipe>, RepositoryError>;

    /// Persist a fully formed record (id and timestamps already assigned).
    async fn create(&self, scope: &Scope, recipe: Recipe) -> Result<Recipe, RepositoryError>;

    /// Replace the record stored under `id`, only if one exists. The stored
    /// record's `id` is always `id`.
    ///
    /// The existence check and the write are not atomic together: a `delete`
    /// landing between them is undone by the write. This race is accepted,
    /// like lost updates between concurrent writers.
    async fn update(
        &self,
        scope: &Scope,
        id: &str,
        recipe: Recipe,
    ) -> Result<Option<Recipe>, RepositoryError>;

    /// Remove the record, returning whether anything was removed.
    async fn delete(&self, scope: &Scope, id: &str) -> Result<bool, RepositoryError>;
}

/// On-disk layout used for recipe storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageLayout {
    /// One JSON file per record.
    #[default]
    PerRecord,
    /// One JSON array file per scope.
    SingleFile,
}

impl FromStr for StorageLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-record" => Ok(StorageLayout::PerRecord),
            "single-file" => Ok(StorageLayout::SingleFile),
            other => Err(format!(
                "Unknown storage layout: {} (expected \"per-record\" or \"single-file\")",
                other
            )),
        }
    }
}

impl std::fmt::Display for StorageLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageLayout::PerRecord => f.write_str("per-record"),
            StorageLayout::SingleFile => f.write_str("single-file"),
        }
    }
}

/// Open a repository with the given layout rooted at `data_dir`.
///
/// Nothing is created on disk until the first write.
pub fn open_repository(layout: StorageLayout, data_dir: PathBuf) -> Arc<dyn RecipeRepository> {
    match layout {
        StorageLayout::PerRecord => Arc::new(FileRecipeRepository::new(data_dir)),
        StorageLayout::SingleFile => Arc::new(JsonArrayRecipeRepository::new(data_dir)),
    }
}

/// Directory holding everything that belongs to a scope.
fn scope_root(data_dir: &Path, scope: &Scope) -> PathBuf {
    match scope {
        Scope::Global => data_dir.to_path_buf(),
        Scope::Chief(chief) => data_dir.join("chiefs").join(chief.as_str()),
    }
}

/// Read and parse a JSON file. A missing file is `Ok(None)`.
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RepositoryError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(RepositoryError::io(path, e)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| RepositoryError::Malformed {
            path: path.to_path_buf(),
            source,
        })
}

/// Write pretty-printed JSON through a hidden sibling temp file, creating
/// parent directories as needed.
async fn write_json_atomic<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), RepositoryError> {
    let content = serde_json::to_vec_pretty(value)?;

    let dir = path.parent().ok_or_else(|| {
        RepositoryError::io(
            path,
            std::io::Error::new(ErrorKind::InvalidInput, "path has no parent directory"),
        )
    })?;
    fs::create_dir_all(dir)
        .await
        .map_err(|e| RepositoryError::io(dir, e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = dir.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()));

    fs::write(&tmp_path, &content)
        .await
        .map_err(|e| RepositoryError::io(&tmp_path, e))?;

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(RepositoryError::io(path, e));
    }

    Ok(())
}
