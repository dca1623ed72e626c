//! Forms commands

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use formcraft_core::{
    FieldType, FieldValue, FormBuilderUseCases, FormSchema, RuleValue, ValidationType,
};
use serde::Deserialize;
use tabled::Tabled;

use super::open_builder;
use crate::{output::OutputFormat, FormCommands};

/// Form draft as written in an import file
#[derive(Debug, Deserialize)]
pub struct DraftFile {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<DraftField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftField {
    /// Local key other fields use in `parentFields`; labels work too
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub default_value: Option<FieldValue>,
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub validations: Vec<DraftRule>,
    pub parent_fields: Option<Vec<String>>,
    pub derivation_logic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DraftRule {
    #[serde(rename = "type")]
    pub rule_type: ValidationType,
    pub value: Option<RuleValue>,
    pub message: Option<String>,
}

#[derive(Tabled)]
struct FormRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Fields")]
    fields: usize,
    #[tabled(rename = "Created")]
    created: String,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Type")]
    field_type: String,
    #[tabled(rename = "Required")]
    required: bool,
    #[tabled(rename = "Rules")]
    rules: String,
    #[tabled(rename = "Derived")]
    derived: String,
}

pub fn handle(action: FormCommands, store: &Path, format: OutputFormat) -> Result<(), String> {
    let mut builder = open_builder(store)?;
    match action {
        FormCommands::List => {
            let rows = builder
                .forms()
                .iter()
                .map(|f| FormRow {
                    id: f.id.clone(),
                    name: f.name.clone(),
                    fields: f.fields.len(),
                    created: f.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect::<Vec<_>>();
            format.print_rows(&builder.forms(), rows);
        }
        FormCommands::Show { id } => {
            let form = builder.load_form(&id).map_err(|e| e.to_string())?;
            if format == OutputFormat::Table {
                println!("{} ({})", form.name, form.id);
            }
            format.print_rows(&form, field_rows(&form));
        }
        FormCommands::Delete { id } => {
            if !builder.forms().iter().any(|f| f.id == id) {
                return Err(format!("Form not found: {}", id));
            }
            builder.delete_form(&id).map_err(|e| e.to_string())?;
            println!("Deleted form: {}", id);
        }
        FormCommands::Import { file } => {
            let draft = read_draft(&file)?;
            let form = import_draft(&mut builder, draft)?;
            println!("Saved form: {} ({} fields)", form.id, form.fields.len());
        }
    }
    Ok(())
}

fn field_rows(form: &FormSchema) -> Vec<FieldRow> {
    let labels: HashMap<&str, &str> =
        form.fields.iter().map(|f| (f.id.as_str(), f.label.as_str())).collect();
    form.fields
        .iter()
        .enumerate()
        .map(|(i, f)| FieldRow {
            position: i + 1,
            id: f.id.clone(),
            label: f.label.clone(),
            field_type: f.field_type.to_string(),
            required: f.required,
            rules: f
                .validations
                .iter()
                .map(|r| match r.threshold() {
                    Some(t) => format!("{}={}", r.rule_type, FieldValue::Number(t)),
                    None => r.rule_type.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            derived: if f.is_derived {
                let parents = f
                    .parents()
                    .iter()
                    .map(|p| labels.get(p.as_str()).copied().unwrap_or(p.as_str()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({})", f.derivation_logic.as_deref().unwrap_or_default(), parents)
            } else {
                String::new()
            },
        })
        .collect()
}

fn read_draft(path: &Path) -> Result<DraftFile, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    }
}

/// Build a draft field by field through the builder, then save it.
///
/// Parent references may name another draft field by its local `id` or its
/// label; they are rewritten to the ids generated for this form.
pub fn import_draft<B: FormBuilderUseCases>(
    builder: &mut B,
    draft: DraftFile,
) -> Result<FormSchema, String> {
    builder.reset_current_form();
    builder.set_form_name(&draft.name);

    let added: Vec<_> = draft.fields.iter().map(|f| builder.add_field(f.field_type)).collect();

    let mut keys: HashMap<&str, &str> = HashMap::new();
    for (entry, field) in draft.fields.iter().zip(&added) {
        if let Some(label) = &entry.label {
            keys.entry(label.as_str()).or_insert(field.id.as_str());
        }
    }
    // local ids win over labels
    for (entry, field) in draft.fields.iter().zip(&added) {
        if let Some(id) = &entry.id {
            keys.insert(id.as_str(), field.id.as_str());
        }
    }

    for (entry, added_field) in draft.fields.iter().zip(&added) {
        let mut field = added_field.clone();
        if let Some(label) = &entry.label {
            field.set_label(label.as_str());
        }
        field.default_value = entry.default_value.clone();

        if let Some(options) = &entry.options {
            field.options.clear();
            for option in options {
                field.add_option(option);
            }
        }

        for rule in &entry.validations {
            let index = match rule.rule_type {
                ValidationType::Required => {
                    field.set_required(true);
                    field
                        .validations
                        .iter()
                        .position(|v| v.rule_type == ValidationType::Required)
                        .unwrap_or_default()
                }
                rule_type => {
                    field.add_validation(rule_type, rule.value.clone());
                    field.validations.len() - 1
                }
            };
            field
                .update_validation(index, None, rule.message.clone())
                .map_err(|e| e.to_string())?;
        }
        // rules replay in the listed order; the flag only adds a missing REQUIRED
        if entry.required && !field.required {
            field.set_required(true);
        }

        if entry.parent_fields.is_some() || entry.derivation_logic.is_some() {
            field.toggle_derived();
            let parents = entry
                .parent_fields
                .iter()
                .flatten()
                .map(|p| {
                    keys.get(p.as_str())
                        .map(|id| id.to_string())
                        .ok_or_else(|| format!("Unknown parent field '{}' in '{}'", p, field.label))
                })
                .collect::<Result<Vec<_>, _>>()?;
            field.set_parent_fields(parents).map_err(|e| e.to_string())?;
            field
                .set_derivation_logic(entry.derivation_logic.clone().unwrap_or_default())
                .map_err(|e| e.to_string())?;
        }

        builder.update_field(field).map_err(|e| e.to_string())?;
    }

    builder
        .save_current_form()
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "Form not saved: a form needs a name and at least one field".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcraft_core::infrastructure::{InMemoryKeyValueStore, LocalFormStorage};
    use formcraft_core::{validate, FormBuilderService, ValidationRule, AGE_FROM_DOB};
    use std::sync::Arc;

    fn builder() -> FormBuilderService {
        FormBuilderService::new(Arc::new(LocalFormStorage::new(InMemoryKeyValueStore::new()))).unwrap()
    }

    const DRAFT: &str = r#"
name: Registration
fields:
  - type: text
    label: Email
    required: true
    validations:
      - type: email
        message: Use a real address
  - id: dob
    type: date
    label: Date of birth
  - type: number
    label: Age
    parentFields: [dob]
    derivationLogic: ageFromDOB
  - type: select
    label: Plan
    options: [Basic, " Pro ", ""]
"#;

    #[test]
    fn test_import_yaml_draft() {
        let mut builder = builder();
        let draft: DraftFile = serde_yaml::from_str(DRAFT).unwrap();
        let form = import_draft(&mut builder, draft).unwrap();

        assert_eq!(form.name, "Registration");
        assert_eq!(builder.forms().len(), 1);

        let email = &form.fields[0];
        assert!(email.required);
        assert_eq!(email.validations[0].message, "Use a real address");
        assert_eq!(email.validations[1], ValidationRule::required());

        let age = &form.fields[2];
        assert!(age.is_derived);
        assert_eq!(age.parents().to_vec(), vec![form.fields[1].id.clone()]);
        assert_eq!(age.derivation_logic.as_deref(), Some(AGE_FROM_DOB));

        assert_eq!(form.fields[3].options, vec!["Basic", "Pro"]);
    }

    #[test]
    fn test_import_keeps_rule_order() {
        let mut builder = builder();
        let draft: DraftFile = serde_yaml::from_str(
            r#"
name: Ordered
fields:
  - type: text
    label: Email
    required: true
    validations:
      - type: email
        message: E
      - type: required
        message: R
"#,
        )
        .unwrap();
        let form = import_draft(&mut builder, draft).unwrap();

        let field = &form.fields[0];
        let order: Vec<_> = field.validations.iter().map(|r| r.rule_type).collect();
        assert_eq!(order, vec![ValidationType::Email, ValidationType::Required]);
        assert!(field.required);
        assert_eq!(validate(Some(&FieldValue::from("")), &field.validations).as_deref(), Some("E"));
    }

    #[test]
    fn test_required_flag_without_rule() {
        let mut builder = builder();
        let draft: DraftFile = serde_yaml::from_str(
            "name: N\nfields:\n  - type: text\n    required: true\n    validations:\n      - type: email\n",
        )
        .unwrap();
        let form = import_draft(&mut builder, draft).unwrap();
        let order: Vec<_> = form.fields[0].validations.iter().map(|r| r.rule_type).collect();
        assert_eq!(order, vec![ValidationType::Email, ValidationType::Required]);
    }

    #[test]
    fn test_parent_by_label() {
        let mut builder = builder();
        let draft: DraftFile = serde_json::from_str(
            r#"{"name":"N","fields":[
                {"type":"date","label":"Born"},
                {"type":"number","label":"Age","parentFields":["Born"],"derivationLogic":"ageFromDOB"}
            ]}"#,
        )
        .unwrap();
        let form = import_draft(&mut builder, draft).unwrap();
        assert_eq!(form.fields[1].parents().to_vec(), vec![form.fields[0].id.clone()]);
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut builder = builder();
        let draft: DraftFile = serde_yaml::from_str(
            "name: N\nfields:\n  - type: number\n    parentFields: [missing]\n",
        )
        .unwrap();
        assert!(import_draft(&mut builder, draft).unwrap_err().contains("missing"));
        assert!(builder.forms().is_empty());
    }

    #[test]
    fn test_unsaveable_draft_reported() {
        let mut builder = builder();
        let draft: DraftFile = serde_yaml::from_str("name: Empty\n").unwrap();
        assert!(import_draft(&mut builder, draft).unwrap_err().starts_with("Form not saved"));
    }
}
