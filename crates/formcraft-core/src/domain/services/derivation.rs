//! Derived Value Evaluator
//!
//! Computes the read-only value of a derived field from its parent fields
//! through a registry of named formulas.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::domain::value_objects::{FieldValue, FormField};

/// Name of the built-in age formula
pub const AGE_FROM_DOB: &str = "ageFromDOB";

/// A formula maps parent values (in `parentFields` order) and the
/// evaluation instant to a value. `None` means "nothing to show".
pub type Formula = fn(&[Option<&FieldValue>], DateTime<Utc>) -> Option<FieldValue>;

/// Registry of derivation formulas by name
#[derive(Clone)]
pub struct DerivationRegistry {
    formulas: HashMap<String, Formula>,
}

impl DerivationRegistry {
    /// Registry without any formulas; every lookup falls back to passthrough
    pub fn empty() -> Self {
        Self { formulas: HashMap::new() }
    }

    /// Registry with the built-in formulas
    pub fn with_builtins() -> Self {
        Self::empty().with_formula(AGE_FROM_DOB, age_from_dob)
    }

    pub fn with_formula(mut self, name: impl Into<String>, formula: Formula) -> Self {
        self.formulas.insert(name.into(), formula);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formulas.contains_key(name)
    }

    /// Evaluate `field` against `form_data` at the current instant
    pub fn derive_value(&self, field: &FormField, form_data: &HashMap<String, FieldValue>) -> Option<FieldValue> {
        self.derive_value_at(field, form_data, Utc::now())
    }

    /// Evaluate `field` against `form_data` at `now`.
    ///
    /// Returns `None` for non-derived fields, fields without parents or
    /// logic, and any formula that cannot produce a value. Unknown formula
    /// names pass the first parent's value through unchanged.
    pub fn derive_value_at(
        &self,
        field: &FormField,
        form_data: &HashMap<String, FieldValue>,
        now: DateTime<Utc>,
    ) -> Option<FieldValue> {
        if !field.is_derived {
            return None;
        }
        let logic = field.derivation_logic.as_deref().filter(|l| !l.is_empty())?;
        let parents = field.parents();
        if parents.is_empty() {
            return None;
        }

        let values: Vec<Option<&FieldValue>> = parents.iter().map(|id| form_data.get(id)).collect();

        match self.formulas.get(logic) {
            Some(formula) => {
                let result = formula(&values, now);
                if result.is_none() {
                    tracing::trace!(field_id = %field.id, logic, "derivation produced no value");
                }
                result
            }
            None => values[0].cloned(),
        }
    }
}

impl std::fmt::Debug for DerivationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.formulas.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("DerivationRegistry").field("formulas", &names).finish()
    }
}

impl Default for DerivationRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Evaluate `field` with the built-in registry at the current instant
pub fn derive_value(field: &FormField, form_data: &HashMap<String, FieldValue>) -> Option<FieldValue> {
    static BUILTINS: OnceLock<DerivationRegistry> = OnceLock::new();
    BUILTINS
        .get_or_init(DerivationRegistry::with_builtins)
        .derive_value(field, form_data)
}

/// Whole calendar years between the first parent's date and `now`
fn age_from_dob(parents: &[Option<&FieldValue>], now: DateTime<Utc>) -> Option<FieldValue> {
    let dob = parents.first().copied().flatten()?.as_text()?;
    let birth = parse_date(dob)?;
    let years = now.date_naive().years_since(birth)?;
    Some(FieldValue::Number(f64::from(years)))
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.with_timezone(&Utc).date_naive()))
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M").ok().map(|dt| dt.date()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldType;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn age_field() -> FormField {
        FormField::new(FieldType::Number, "Age").derived_from(vec!["dob".into()], AGE_FROM_DOB)
    }

    fn data(pairs: &[(&str, FieldValue)]) -> HashMap<String, FieldValue> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_non_derived_is_none() {
        let registry = DerivationRegistry::default();
        let field = FormField::new(FieldType::Text, "Plain");
        let form = data(&[(field.id.as_str(), FieldValue::from("x"))]);
        assert_eq!(registry.derive_value_at(&field, &form, instant()), None);
    }

    #[test]
    fn test_missing_parents_or_logic() {
        let registry = DerivationRegistry::default();
        let form = data(&[("dob", FieldValue::from("1990-01-01"))]);

        let mut field = age_field();
        field.parent_fields = Some(vec![]);
        assert_eq!(registry.derive_value_at(&field, &form, instant()), None);

        let mut field = age_field();
        field.derivation_logic = Some(String::new());
        assert_eq!(registry.derive_value_at(&field, &form, instant()), None);
    }

    #[test]
    fn test_age_exactly_thirty() {
        let registry = DerivationRegistry::default();
        let form = data(&[("dob", FieldValue::from("1996-10-16"))]);
        assert_eq!(
            registry.derive_value_at(&age_field(), &form, instant()),
            Some(FieldValue::Number(30.0))
        );
    }

    #[test]
    fn test_age_uses_calendar_difference() {
        let registry = DerivationRegistry::default();
        let form = data(&[("dob", FieldValue::from("1996-10-17"))]);
        assert_eq!(
            registry.derive_value_at(&age_field(), &form, instant()),
            Some(FieldValue::Number(29.0))
        );
        let form = data(&[("dob", FieldValue::from("2000-02-29T08:00:00Z"))]);
        assert_eq!(
            registry.derive_value_at(&age_field(), &form, instant()),
            Some(FieldValue::Number(26.0))
        );
    }

    #[test]
    fn test_age_unparseable_or_absent() {
        let registry = DerivationRegistry::default();
        for value in ["", "yesterday", "2030-01-01"] {
            let form = data(&[("dob", FieldValue::from(value))]);
            assert_eq!(registry.derive_value_at(&age_field(), &form, instant()), None, "{value}");
        }
        assert_eq!(registry.derive_value_at(&age_field(), &HashMap::new(), instant()), None);
    }

    #[test]
    fn test_unknown_logic_passes_first_parent_through() {
        let registry = DerivationRegistry::default();
        let field = FormField::new(FieldType::Text, "Copy")
            .derived_from(vec!["a".into(), "b".into()], "ageFromDob");
        let form = data(&[("a", FieldValue::Number(7.0)), ("b", FieldValue::from("ignored"))]);
        assert_eq!(registry.derive_value_at(&field, &form, instant()), Some(FieldValue::Number(7.0)));
    }

    #[test]
    fn test_custom_formula() {
        fn concat(parents: &[Option<&FieldValue>], _: DateTime<Utc>) -> Option<FieldValue> {
            let joined: Vec<String> = parents.iter().flatten().map(|v| v.to_string()).collect();
            Some(FieldValue::Text(joined.join(" ")))
        }
        let registry = DerivationRegistry::empty().with_formula("fullName", concat);
        assert!(registry.contains("fullName"));
        assert!(!registry.contains(AGE_FROM_DOB));

        let field = FormField::new(FieldType::Text, "Name")
            .derived_from(vec!["first".into(), "last".into()], "fullName");
        let form = data(&[("first", FieldValue::from("Ada")), ("last", FieldValue::from("Lovelace"))]);
        assert_eq!(registry.derive_value_at(&field, &form, instant()), Some(FieldValue::from("Ada Lovelace")));
    }
}
