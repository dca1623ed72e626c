//! Fill command

use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;
use formcraft_core::{
    FieldInput, FieldType, FieldValue, FillSession, FormBuilderUseCases, FormField, SubmitOutcome,
};
use serde::Serialize;
use tabled::Tabled;

use super::open_builder;
use crate::output::OutputFormat;

#[derive(Tabled)]
struct FillRow {
    #[tabled(rename = "Field")]
    label: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Error")]
    error: String,
}

/// Result of filling a form, keyed by field label
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillReport {
    pub form_id: String,
    pub accepted: bool,
    pub message: String,
    pub values: BTreeMap<String, FieldValue>,
    pub errors: BTreeMap<String, String>,
}

pub fn handle(id: &str, assignments: &[String], store: &Path, format: OutputFormat) -> Result<(), String> {
    let mut builder = open_builder(store)?;
    let form = builder.load_form(id).map_err(|e| e.to_string())?;

    let mut session = FillSession::new(form.fields);
    for assignment in assignments {
        apply(&mut session, assignment)?;
    }
    let outcome = session.submit();

    let rows = session
        .fields()
        .iter()
        .map(|f| FillRow {
            label: f.label.clone(),
            value: session.display_value(&f.id).map(|v| v.to_string()).unwrap_or_default(),
            error: session.visible_error(&f.id).unwrap_or_default().to_string(),
        })
        .collect::<Vec<_>>();
    let report = report(&form.id, &session, &outcome);
    format.print_rows(&report, rows);

    match outcome {
        SubmitOutcome::Accepted => {
            if format == OutputFormat::Table {
                println!("{}", outcome.message().green());
            }
            Ok(())
        }
        SubmitOutcome::Rejected { .. } => Err(outcome.message().to_string()),
    }
}

/// Apply one `<field>=<value>` assignment to the session
fn apply(session: &mut FillSession, assignment: &str) -> Result<(), String> {
    let (key, raw) = assignment
        .split_once('=')
        .ok_or_else(|| format!("Expected <field>=<value>, got '{}'", assignment))?;
    let field = resolve(session.fields(), key.trim())?.clone();

    let input = match field.field_type {
        FieldType::Checkbox => {
            let checked = !session
                .value(&field.id)
                .and_then(FieldValue::selections)
                .is_some_and(|s| s.iter().any(|o| o == raw));
            FieldInput::Toggle { option: raw.to_string(), checked }
        }
        FieldType::Number => FieldInput::Value(
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(FieldValue::Number)
                .unwrap_or_else(|| FieldValue::from(raw)),
        ),
        _ => FieldInput::Value(FieldValue::from(raw)),
    };

    session.change(&field.id, input).map_err(|e| e.to_string())
}

/// Find a field by id, falling back to its label
fn resolve<'a>(fields: &'a [FormField], key: &str) -> Result<&'a FormField, String> {
    fields
        .iter()
        .find(|f| f.id == key)
        .or_else(|| fields.iter().find(|f| f.label == key))
        .ok_or_else(|| format!("No field '{}' in this form", key))
}

fn report(form_id: &str, session: &FillSession, outcome: &SubmitOutcome) -> FillReport {
    let mut values = BTreeMap::new();
    let mut errors = BTreeMap::new();
    for field in session.fields() {
        if let Some(value) = session.display_value(&field.id) {
            values.insert(field.label.clone(), value);
        }
        if let Some(error) = session.visible_error(&field.id) {
            errors.insert(field.label.clone(), error.to_string());
        }
    }
    FillReport {
        form_id: form_id.to_string(),
        accepted: outcome.is_accepted(),
        message: outcome.message().to_string(),
        values,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcraft_core::ValidationRule;

    fn session() -> FillSession {
        let mut age = FormField::new(FieldType::Number, "Age").with_validation(ValidationRule::min(18.0));
        age.id = "age".into();
        let mut toppings = FormField::new(FieldType::Checkbox, "Toppings");
        toppings.options = vec!["Ham".into(), "Olives".into()];
        toppings.id = "toppings".into();
        FillSession::new(vec![age, toppings])
    }

    #[test]
    fn test_number_assignment_by_label() {
        let mut s = session();
        apply(&mut s, "Age=21").unwrap();
        assert_eq!(s.value("age"), Some(&FieldValue::Number(21.0)));
        apply(&mut s, "age=abc").unwrap();
        assert_eq!(s.value("age"), Some(&FieldValue::from("abc")));
        assert!(s.visible_error("age").is_some());
    }

    #[test]
    fn test_checkbox_assignments_toggle() {
        let mut s = session();
        apply(&mut s, "Toppings=Ham").unwrap();
        apply(&mut s, "Toppings=Olives").unwrap();
        apply(&mut s, "Toppings=Ham").unwrap();
        assert_eq!(s.value("toppings"), Some(&FieldValue::Selections(vec!["Olives".into()])));
    }

    #[test]
    fn test_bad_assignments() {
        let mut s = session();
        assert!(apply(&mut s, "Age").is_err());
        assert!(apply(&mut s, "Height=3").unwrap_err().contains("Height"));
    }

    #[test]
    fn test_report_uses_labels() {
        let mut s = session();
        apply(&mut s, "Age=12").unwrap();
        let outcome = s.submit();
        let report = report("f1", &s, &outcome);
        assert!(!report.accepted);
        assert_eq!(report.values.get("Age"), Some(&FieldValue::Number(12.0)));
        assert!(report.errors.contains_key("Age"));
        assert!(!report.errors.contains_key("Toppings"));
    }
}
