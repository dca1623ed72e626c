//! Form Aggregate
//!
//! `FormDraft` is the working copy being edited; `FormSchema` is a draft
//! that has been saved and stamped with an id and creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{FieldType, FormField};
use crate::domain::FormError;

/// Unsaved working schema
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl FormDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), fields: vec![] }
    }

    /// A draft can be saved once it has a name and at least one field
    pub fn is_saveable(&self) -> bool {
        !self.name.is_empty() && !self.fields.is_empty()
    }

    /// Append a field labelled "Field N"
    pub fn add_field(&mut self, field_type: FieldType) -> &FormField {
        let label = format!("Field {}", self.fields.len() + 1);
        self.fields.push(FormField::new(field_type, label));
        &self.fields[self.fields.len() - 1]
    }

    /// Replace the field with the same id, keeping its position
    pub fn update_field(&mut self, updated: FormField) -> Result<(), FormError> {
        let slot = self
            .fields
            .iter_mut()
            .find(|f| f.id == updated.id)
            .ok_or_else(|| FormError::FieldNotFound(updated.id.clone()))?;
        *slot = updated;
        Ok(())
    }

    /// Remove a field by id; `None` when no field matched
    pub fn remove_field(&mut self, id: &str) -> Option<FormField> {
        let index = self.fields.iter().position(|f| f.id == id)?;
        Some(self.fields.remove(index))
    }

    /// Move the field at `from` so it ends up at `to`
    pub fn reorder_fields(&mut self, from: usize, to: usize) -> Result<(), FormError> {
        let len = self.fields.len();
        if from >= len {
            return Err(FormError::IndexOutOfBounds { index: from, len });
        }
        if to >= len {
            return Err(FormError::IndexOutOfBounds { index: to, len });
        }
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        Ok(())
    }
}

/// Saved schema
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub fields: Vec<FormField>,
}

impl FormSchema {
    /// Stamp a draft with a fresh id and the given creation time
    pub fn from_draft(draft: FormDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: draft.name,
            created_at,
            fields: draft.fields,
        }
    }

    /// Working copy of this schema's name and fields
    pub fn to_draft(&self) -> FormDraft {
        FormDraft { name: self.name.clone(), fields: self.fields.clone() }
    }
}
