//! Inbound ports (Use case traits)
//!
//! Hexagonal architecture: application service interfaces.

use crate::domain::aggregates::{FormDraft, FormSchema};
use crate::domain::value_objects::{FieldType, FormField};
use crate::Result;

/// Schema building and cataloguing use cases
pub trait FormBuilderUseCases {
    /// Start over with an empty, unnamed form
    fn reset_current_form(&mut self);

    /// Edit a copy of a saved schema
    fn set_current_form(&mut self, schema: &FormSchema);

    fn set_form_name(&mut self, name: &str);

    /// Append a new field and return it
    fn add_field(&mut self, field_type: FieldType) -> FormField;

    /// Replace the field with the same id
    fn update_field(&mut self, field: FormField) -> Result<()>;

    /// Remove a field by id
    fn remove_field(&mut self, id: &str) -> Option<FormField>;

    /// Move a field between positions
    fn reorder_fields(&mut self, from: usize, to: usize) -> Result<()>;

    /// Persist the current form; `None` when it has no name or no fields
    fn save_current_form(&mut self) -> Result<Option<FormSchema>>;

    /// Refresh the cached form list from storage
    fn load_forms(&mut self) -> Result<()>;

    /// Load a saved form into the editor
    fn load_form(&mut self, id: &str) -> Result<FormSchema>;

    /// Delete a saved form and refresh the cache
    fn delete_form(&mut self, id: &str) -> Result<()>;

    fn current_form(&self) -> &FormDraft;

    fn forms(&self) -> &[FormSchema];
}
