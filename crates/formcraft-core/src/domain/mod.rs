//! Domain module
//!
//! Field and schema types plus the pure rules that operate on them.

pub mod aggregates;
pub mod value_objects;
pub mod services;

pub use aggregates::*;
pub use value_objects::*;

use thiserror::Error;

/// Misuse of a schema or field transition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("index {index} out of bounds for {len} items")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("field {0} is not derived")]
    NotDerived(String),

    #[error("field {0} is derived and cannot be edited")]
    DerivedReadOnly(String),
}
