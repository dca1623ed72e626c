//! Formcraft Form Builder Core
//!
//! Self-hosted form builder: compose a schema of input fields, attach
//! validation rules and derived-value formulas, persist named schemas to a
//! local key-value store and fill the resulting form with live validation.
//!
//! ## Architecture
//!
//! - **Domain Layer**: field and schema types, validation engine, derivation registry
//! - **Application Layer**: schema builder service, form-fill sessions
//! - **Ports Layer**: builder use cases, key-value and form repository interfaces
//! - **Infrastructure Layer**: in-memory and file-backed key-value stores, JSON form storage
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use formcraft_core::{FieldType, FormBuilderService, FormBuilderUseCases};
//! use formcraft_core::infrastructure::{InMemoryKeyValueStore, LocalFormStorage};
//!
//! let storage = Arc::new(LocalFormStorage::new(InMemoryKeyValueStore::new()));
//! let mut builder = FormBuilderService::new(storage).unwrap();
//! builder.set_form_name("Contact");
//! builder.add_field(FieldType::Text);
//! let saved = builder.save_current_form().unwrap();
//! assert!(saved.is_some());
//! assert_eq!(builder.forms().len(), 1);
//! ```

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;

use thiserror::Error;

pub use domain::aggregates::{FormDraft, FormSchema};
pub use domain::services::{derive_value, validate, DerivationRegistry, AGE_FROM_DOB};
pub use domain::value_objects::{FieldType, FieldValue, FormField, RuleValue, ValidationRule, ValidationType};
pub use domain::FormError;
pub use application::{FieldInput, FillSession, FormBuilderService, FormBuilderState, SubmitOutcome};
pub use ports::inbound::FormBuilderUseCases;
pub use ports::outbound::{FormRepository, KeyValueStore, RepositoryError};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum FormsError {
    #[error("Form not found: {0}")]
    FormNotFound(String),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, FormsError>;
