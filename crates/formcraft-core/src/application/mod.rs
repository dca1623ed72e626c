//! Application layer
//!
//! Orchestrates use cases and coordinates domain objects.

pub mod builder;
pub mod fill;

pub use builder::{FormBuilderService, FormBuilderState};
pub use fill::{FieldInput, FillSession, SubmitOutcome};
