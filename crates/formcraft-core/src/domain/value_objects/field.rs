//! Form Field
//!
//! One input definition within a schema, plus the editing operations the
//! field configurator applies to it before handing it back to the builder.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::{RuleValue, ValidationRule, ValidationType};
use super::value::FieldValue;
use crate::domain::FormError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
}

impl FieldType {
    /// Types whose input is picked from `options`
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Checkbox)
    }

    /// Placeholder options a new field of this type starts with
    pub fn default_options(&self) -> Vec<String> {
        match self {
            Self::Select | Self::Radio => vec!["Option 1".to_string(), "Option 2".to_string()],
            _ => vec![],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub validations: Vec<ValidationRule>,
    #[serde(default)]
    pub is_derived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derivation_logic: Option<String>,
}

impl FormField {
    /// New field with a generated id and the type's placeholder options
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            field_type,
            label: label.into(),
            required: false,
            default_value: None,
            options: field_type.default_options(),
            validations: vec![],
            is_derived: false,
            parent_fields: None,
            derivation_logic: None,
        }
    }

    pub fn with_validation(mut self, rule: ValidationRule) -> Self {
        if rule.rule_type == ValidationType::Required {
            self.required = true;
        }
        self.validations.push(rule);
        self
    }

    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Turn the field into a derived one computed by `logic` from `parents`
    pub fn derived_from(mut self, parents: Vec<String>, logic: impl Into<String>) -> Self {
        self.is_derived = true;
        self.parent_fields = Some(parents);
        self.derivation_logic = Some(logic.into());
        self
    }

    pub fn parents(&self) -> &[String] {
        self.parent_fields.as_deref().unwrap_or_default()
    }

    // =========================================================================
    // Configurator operations
    // =========================================================================

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Toggle required, keeping a single REQUIRED rule in step with the flag
    pub fn set_required(&mut self, required: bool) {
        if required {
            if !self.validations.iter().any(|v| v.rule_type == ValidationType::Required) {
                self.validations.push(ValidationRule::required());
            }
        } else {
            self.validations.retain(|v| v.rule_type != ValidationType::Required);
        }
        self.required = required;
    }

    /// Append an option; blank input is ignored
    pub fn add_option(&mut self, option: &str) -> bool {
        let option = option.trim();
        if option.is_empty() {
            return false;
        }
        self.options.push(option.to_string());
        true
    }

    pub fn update_option(&mut self, index: usize, option: impl Into<String>) -> Result<(), FormError> {
        let len = self.options.len();
        let slot = self
            .options
            .get_mut(index)
            .ok_or(FormError::IndexOutOfBounds { index, len })?;
        *slot = option.into();
        Ok(())
    }

    pub fn remove_option(&mut self, index: usize) -> Result<String, FormError> {
        if index >= self.options.len() {
            return Err(FormError::IndexOutOfBounds { index, len: self.options.len() });
        }
        Ok(self.options.remove(index))
    }

    /// Append a rule of `rule_type` with its default message
    pub fn add_validation(&mut self, rule_type: ValidationType, value: Option<RuleValue>) {
        self.validations.push(ValidationRule::new(rule_type, value));
    }

    /// Patch a rule's threshold and/or message
    pub fn update_validation(
        &mut self,
        index: usize,
        value: Option<RuleValue>,
        message: Option<String>,
    ) -> Result<(), FormError> {
        let len = self.validations.len();
        let rule = self
            .validations
            .get_mut(index)
            .ok_or(FormError::IndexOutOfBounds { index, len })?;
        if value.is_some() {
            rule.value = value;
        }
        if let Some(message) = message {
            rule.message = message;
        }
        Ok(())
    }

    pub fn remove_validation(&mut self, index: usize) -> Result<ValidationRule, FormError> {
        if index >= self.validations.len() {
            return Err(FormError::IndexOutOfBounds { index, len: self.validations.len() });
        }
        Ok(self.validations.remove(index))
    }

    /// Flip derived mode. Parents and logic start empty when turned on and
    /// are cleared when turned off.
    pub fn toggle_derived(&mut self) {
        self.is_derived = !self.is_derived;
        if self.is_derived {
            self.parent_fields = Some(vec![]);
            self.derivation_logic = Some(String::new());
        } else {
            self.parent_fields = None;
            self.derivation_logic = None;
        }
    }

    pub fn set_parent_fields(&mut self, parents: Vec<String>) -> Result<(), FormError> {
        self.ensure_derived()?;
        self.parent_fields = Some(parents);
        Ok(())
    }

    pub fn set_derivation_logic(&mut self, logic: impl Into<String>) -> Result<(), FormError> {
        self.ensure_derived()?;
        self.derivation_logic = Some(logic.into());
        Ok(())
    }

    fn ensure_derived(&self) -> Result<(), FormError> {
        if self.is_derived {
            Ok(())
        } else {
            Err(FormError::NotDerived(self.id.clone()))
        }
    }
}
