//! Aggregates module

pub mod form;

pub use form::{FormDraft, FormSchema};
