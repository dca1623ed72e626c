//! Form builder service
//!
//! Owns the builder state: the form being edited and the cached list of
//! saved forms. Every field-list mutation goes through here.

use std::sync::Arc;

use crate::domain::aggregates::{FormDraft, FormSchema};
use crate::domain::value_objects::{FieldType, FormField};
use crate::ports::inbound::FormBuilderUseCases;
use crate::ports::outbound::FormRepository;
use crate::{FormsError, Result};

/// Builder state for one session
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormBuilderState {
    pub current_form: FormDraft,
    pub forms: Vec<FormSchema>,
}

/// Form builder application service
pub struct FormBuilderService {
    state: FormBuilderState,
    repository: Arc<dyn FormRepository>,
}

impl FormBuilderService {
    /// Create the service and prime the form cache from storage
    pub fn new(repository: Arc<dyn FormRepository>) -> Result<Self> {
        let forms = repository.list()?;
        tracing::debug!(count = forms.len(), "loaded saved forms");
        Ok(Self {
            state: FormBuilderState { current_form: FormDraft::default(), forms },
            repository,
        })
    }
}

impl FormBuilderUseCases for FormBuilderService {
    fn reset_current_form(&mut self) {
        self.state.current_form = FormDraft::default();
    }

    fn set_current_form(&mut self, schema: &FormSchema) {
        self.state.current_form = schema.to_draft();
    }

    fn set_form_name(&mut self, name: &str) {
        self.state.current_form.name = name.to_string();
    }

    fn add_field(&mut self, field_type: FieldType) -> FormField {
        let field = self.state.current_form.add_field(field_type).clone();
        tracing::debug!(field_id = %field.id, %field_type, "field added");
        field
    }

    fn update_field(&mut self, field: FormField) -> Result<()> {
        let id = field.id.clone();
        self.state.current_form.update_field(field)?;
        tracing::debug!(field_id = %id, "field updated");
        Ok(())
    }

    fn remove_field(&mut self, id: &str) -> Option<FormField> {
        let removed = self.state.current_form.remove_field(id);
        if removed.is_none() {
            tracing::debug!(field_id = id, "remove ignored, no such field");
        }
        removed
    }

    fn reorder_fields(&mut self, from: usize, to: usize) -> Result<()> {
        self.state.current_form.reorder_fields(from, to)?;
        tracing::debug!(from, to, "fields reordered");
        Ok(())
    }

    fn save_current_form(&mut self) -> Result<Option<FormSchema>> {
        if !self.state.current_form.is_saveable() {
            tracing::debug!("save skipped, form needs a name and at least one field");
            return Ok(None);
        }
        let saved = self.repository.save(&self.state.current_form)?;
        tracing::info!(form_id = %saved.id, name = %saved.name, fields = saved.fields.len(), "form saved");
        self.state.forms.push(saved.clone());
        Ok(Some(saved))
    }

    fn load_forms(&mut self) -> Result<()> {
        self.state.forms = self.repository.list()?;
        Ok(())
    }

    fn load_form(&mut self, id: &str) -> Result<FormSchema> {
        let schema = self
            .repository
            .get_by_id(id)?
            .ok_or_else(|| FormsError::FormNotFound(id.to_string()))?;
        self.set_current_form(&schema);
        Ok(schema)
    }

    fn delete_form(&mut self, id: &str) -> Result<()> {
        self.repository.delete_by_id(id)?;
        tracing::info!(form_id = id, "form deleted");
        self.load_forms()
    }

    fn current_form(&self) -> &FormDraft {
        &self.state.current_form
    }

    fn forms(&self) -> &[FormSchema] {
        &self.state.forms
    }
}
