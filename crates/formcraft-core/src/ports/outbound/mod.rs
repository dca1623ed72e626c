//! Outbound ports (storage traits)
//!
//! Hexagonal architecture: these are the interfaces that infrastructure must implement.
//! Calls are synchronous; the backing store is local and always available.

use crate::domain::aggregates::{FormDraft, FormSchema};

/// Repository result type
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Raw key-value storage, the local blob the form list lives in
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`
    fn get(&self, key: &str) -> RepoResult<Option<String>>;

    /// Overwrite the value under `key`
    fn set(&self, key: &str, value: String) -> RepoResult<()>;

    /// Remove `key`; missing keys are ignored
    fn remove(&self, key: &str) -> RepoResult<()>;

    /// All keys, sorted
    fn keys(&self) -> RepoResult<Vec<String>>;
}

/// Saved form catalogue
pub trait FormRepository: Send + Sync {
    /// All saved forms in insertion order
    fn list(&self) -> RepoResult<Vec<FormSchema>>;

    /// Find form by ID
    fn get_by_id(&self, id: &str) -> RepoResult<Option<FormSchema>>;

    /// Persist a draft, assigning its id and creation time
    fn save(&self, draft: &FormDraft) -> RepoResult<FormSchema>;

    /// Delete form; unknown ids are a no-op
    fn delete_by_id(&self, id: &str) -> RepoResult<()>;
}

/// Repository errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for RepositoryError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
