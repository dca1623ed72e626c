//! Form-fill session
//!
//! Drives one fill-and-submit pass over a fixed field list: holds entered
//! values, touched flags and per-field errors, re-validating on change and
//! on submit. Derived fields are computed for display and never validated.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::services::{validate, DerivationRegistry};
use crate::domain::value_objects::{FieldType, FieldValue, FormField};
use crate::domain::FormError;
use crate::Result;

/// A change coming from an input control
#[derive(Clone, Debug, PartialEq)]
pub enum FieldInput {
    /// Replace the field's value
    Value(FieldValue),
    /// Check or uncheck one option of a checkbox group
    Toggle { option: String, checked: bool },
}

/// Result of a submit
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Accepted,
    /// Failing fields as (field id, message), in field order
    Rejected { errors: Vec<(String, String)> },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Accepted => "Form submitted successfully!",
            Self::Rejected { .. } => "Please fix the errors in the form.",
        }
    }
}

pub struct FillSession {
    fields: Vec<FormField>,
    registry: Arc<DerivationRegistry>,
    form_data: HashMap<String, FieldValue>,
    errors: HashMap<String, Option<String>>,
    touched: HashSet<String>,
}

impl FillSession {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self::with_registry(fields, Arc::new(DerivationRegistry::with_builtins()))
    }

    pub fn with_registry(fields: Vec<FormField>, registry: Arc<DerivationRegistry>) -> Self {
        Self {
            fields,
            registry,
            form_data: HashMap::new(),
            errors: HashMap::new(),
            touched: HashSet::new(),
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Entered value of a field
    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.form_data.get(field_id)
    }

    pub fn is_touched(&self, field_id: &str) -> bool {
        self.touched.contains(field_id)
    }

    /// Apply an input change, then re-validate against the new value
    pub fn change(&mut self, field_id: &str, input: FieldInput) -> Result<()> {
        let field = self.field(field_id)?;
        if field.is_derived {
            return Err(FormError::DerivedReadOnly(field_id.to_string()).into());
        }

        let value = match input {
            FieldInput::Value(value) => value,
            FieldInput::Toggle { option, checked } => {
                let mut selected = self
                    .form_data
                    .get(field_id)
                    .and_then(FieldValue::selections)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default();
                if checked {
                    if !selected.contains(&option) {
                        selected.push(option);
                    }
                } else {
                    selected.retain(|o| o != &option);
                }
                FieldValue::Selections(selected)
            }
        };

        let error = validate(Some(&value), &field.validations);
        self.form_data.insert(field_id.to_string(), value);
        self.touched.insert(field_id.to_string());
        self.errors.insert(field_id.to_string(), error);
        Ok(())
    }

    /// Mark a field as interacted with
    pub fn blur(&mut self, field_id: &str) -> Result<()> {
        self.field(field_id)?;
        self.touched.insert(field_id.to_string());
        Ok(())
    }

    /// Touch and validate every input field
    pub fn submit(&mut self) -> SubmitOutcome {
        let mut failures = Vec::new();

        for field in &self.fields {
            self.touched.insert(field.id.clone());
            if field.is_derived {
                continue;
            }

            let empty_selection;
            let value = match (self.form_data.get(&field.id), field.field_type) {
                (Some(v), _) => Some(v),
                (None, FieldType::Checkbox) => {
                    empty_selection = FieldValue::Selections(vec![]);
                    Some(&empty_selection)
                }
                (None, _) => None,
            };

            let error = validate(value, &field.validations);
            if let Some(message) = &error {
                failures.push((field.id.clone(), message.clone()));
            }
            self.errors.insert(field.id.clone(), error);
        }

        if failures.is_empty() {
            tracing::info!(fields = self.fields.len(), "form submitted");
            SubmitOutcome::Accepted
        } else {
            tracing::debug!(failed = failures.len(), "submit rejected");
            SubmitOutcome::Rejected { errors: failures }
        }
    }

    /// Error to show for a field; untouched fields never show one
    pub fn visible_error(&self, field_id: &str) -> Option<&str> {
        if !self.is_touched(field_id) {
            return None;
        }
        self.errors.get(field_id).and_then(|e| e.as_deref())
    }

    /// Value to display for a field at the current instant
    pub fn display_value(&self, field_id: &str) -> Option<FieldValue> {
        self.display_value_at(field_id, Utc::now())
    }

    /// Derived fields are evaluated; inputs show their value or default
    pub fn display_value_at(&self, field_id: &str, now: DateTime<Utc>) -> Option<FieldValue> {
        let field = self.fields.iter().find(|f| f.id == field_id)?;
        if field.is_derived {
            return self.registry.derive_value_at(field, &self.form_data, now);
        }
        self.form_data
            .get(field_id)
            .or(field.default_value.as_ref())
            .cloned()
    }

    fn field(&self, field_id: &str) -> std::result::Result<&FormField, FormError> {
        self.fields
            .iter()
            .find(|f| f.id == field_id)
            .ok_or_else(|| FormError::FieldNotFound(field_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::AGE_FROM_DOB;
    use crate::domain::value_objects::ValidationRule;
    use crate::FormsError;
    use chrono::TimeZone;

    fn text_field(id: &str, rules: Vec<ValidationRule>) -> FormField {
        let mut field = FormField::new(FieldType::Text, id);
        field.id = id.to_string();
        field.validations = rules;
        field
    }

    fn session() -> FillSession {
        let mut dob = FormField::new(FieldType::Date, "Date of birth");
        dob.id = "dob".into();
        let mut age = FormField::new(FieldType::Number, "Age")
            .derived_from(vec!["dob".into()], AGE_FROM_DOB)
            .with_validation(ValidationRule::required());
        age.id = "age".into();
        let mut hobbies = FormField::new(FieldType::Checkbox, "Hobbies").with_validation(ValidationRule::required());
        hobbies.id = "hobbies".into();
        hobbies.options = vec!["chess".into(), "golf".into()];

        FillSession::new(vec![
            text_field("email", vec![ValidationRule::required(), ValidationRule::email()]),
            dob,
            age,
            hobbies,
        ])
    }

    #[test]
    fn test_untouched_fields_hide_errors() {
        let mut s = session();
        assert_eq!(s.visible_error("email"), None);
        s.blur("email").unwrap();
        assert!(s.is_touched("email"));
        // blur alone does not validate
        assert_eq!(s.visible_error("email"), None);
    }

    #[test]
    fn test_change_validates_new_value() {
        let mut s = session();
        s.change("email", FieldInput::Value("nope".into())).unwrap();
        assert_eq!(s.visible_error("email"), Some("Invalid email format"));
        s.change("email", FieldInput::Value("a@b.co".into())).unwrap();
        assert_eq!(s.visible_error("email"), None);
        assert_eq!(s.value("email"), Some(&FieldValue::from("a@b.co")));
    }

    #[test]
    fn test_checkbox_toggles_membership() {
        let mut s = session();
        let toggle = |option: &str, checked| FieldInput::Toggle { option: option.into(), checked };
        s.change("hobbies", toggle("chess", true)).unwrap();
        s.change("hobbies", toggle("golf", true)).unwrap();
        s.change("hobbies", toggle("chess", true)).unwrap();
        assert_eq!(s.value("hobbies"), Some(&FieldValue::Selections(vec!["chess".into(), "golf".into()])));
        assert_eq!(s.visible_error("hobbies"), None);

        s.change("hobbies", toggle("chess", false)).unwrap();
        s.change("hobbies", toggle("golf", false)).unwrap();
        assert_eq!(s.visible_error("hobbies"), Some("This field is required"));
    }

    #[test]
    fn test_submit_rejects_then_accepts() {
        let mut s = session();
        let outcome = s.submit();
        assert_eq!(outcome.message(), "Please fix the errors in the form.");
        let SubmitOutcome::Rejected { errors } = outcome else {
            panic!("expected rejection");
        };
        let ids: Vec<_> = errors.iter().map(|(id, _)| id.as_str()).collect();
        // derived "age" is skipped even though it carries a required rule
        assert_eq!(ids, vec!["email", "hobbies"]);
        assert!(s.is_touched("dob"));
        assert_eq!(s.visible_error("hobbies"), Some("This field is required"));

        s.change("email", FieldInput::Value("me@example.org".into())).unwrap();
        s.change("hobbies", FieldInput::Toggle { option: "golf".into(), checked: true }).unwrap();
        let outcome = s.submit();
        assert!(outcome.is_accepted());
        assert_eq!(outcome.message(), "Form submitted successfully!");
    }

    #[test]
    fn test_derived_display_and_read_only() {
        let mut s = session();
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
        assert_eq!(s.display_value_at("age", now), None);

        s.change("dob", FieldInput::Value("1996-10-16".into())).unwrap();
        assert_eq!(s.display_value_at("age", now), Some(FieldValue::Number(30.0)));

        assert!(matches!(
            s.change("age", FieldInput::Value(FieldValue::Number(5.0))),
            Err(FormsError::Form(FormError::DerivedReadOnly(_)))
        ));
    }

    #[test]
    fn test_display_falls_back_to_default() {
        let field = text_field("city", vec![]).with_default("Lisbon");
        let mut s = FillSession::new(vec![field]);
        assert_eq!(s.display_value("city"), Some(FieldValue::from("Lisbon")));
        s.change("city", FieldInput::Value("Porto".into())).unwrap();
        assert_eq!(s.display_value("city"), Some(FieldValue::from("Porto")));
        assert_eq!(s.display_value("unknown"), None);
    }

    #[test]
    fn test_unknown_field() {
        let mut s = session();
        assert!(matches!(
            s.change("ghost", FieldInput::Value("x".into())),
            Err(FormsError::Form(FormError::FieldNotFound(_)))
        ));
        assert!(s.blur("ghost").is_err());
    }
}
