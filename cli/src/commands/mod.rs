//! CLI Commands

pub mod config;
pub mod fill;
pub mod forms;

use std::path::Path;
use std::sync::Arc;

use formcraft_core::infrastructure::{FileKeyValueStore, LocalFormStorage};
use formcraft_core::FormBuilderService;

/// Open a builder over the JSON store file at `path`
pub fn open_builder(path: &Path) -> Result<FormBuilderService, String> {
    tracing::debug!(store = %path.display(), "opening form store");
    let storage = Arc::new(LocalFormStorage::new(FileKeyValueStore::new(path)));
    FormBuilderService::new(storage).map_err(|e| e.to_string())
}
