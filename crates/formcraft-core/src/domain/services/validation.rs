//! Validation Engine
//!
//! Checks a value against an ordered rule list and reports the message of
//! the first rule it fails.

use crate::domain::value_objects::{FieldValue, ValidationRule, ValidationType};

/// Validate `value` against `rules` in order.
///
/// Returns the message of the first failing rule, or `None` when every rule
/// passes. An absent value is `None`.
pub fn validate(value: Option<&FieldValue>, rules: &[ValidationRule]) -> Option<String> {
    rules
        .iter()
        .find(|rule| !passes(rule, value))
        .map(|rule| rule.message.clone())
}

fn passes(rule: &ValidationRule, value: Option<&FieldValue>) -> bool {
    match rule.rule_type {
        ValidationType::Required => value.is_some_and(|v| !v.is_empty()),
        ValidationType::MinLength => match rule.threshold() {
            Some(min) => text_len(value) as f64 >= min,
            None => false,
        },
        ValidationType::MaxLength => match rule.threshold() {
            Some(max) => text_len(value) as f64 <= max,
            None => false,
        },
        ValidationType::Email => value.is_some_and(|v| is_email_shaped(&v.to_string())),
        ValidationType::Password => {
            let text = text_of(value);
            text.chars().count() >= 8 && text.chars().any(|c| c.is_ascii_digit())
        }
        ValidationType::Min => match (value.and_then(FieldValue::as_number), rule.threshold()) {
            (Some(n), Some(min)) => n >= min,
            _ => false,
        },
        ValidationType::Max => match (value.and_then(FieldValue::as_number), rule.threshold()) {
            (Some(n), Some(max)) => n <= max,
            _ => false,
        },
    }
}

fn text_of(value: Option<&FieldValue>) -> String {
    value.map(FieldValue::to_string).unwrap_or_default()
}

fn text_len(value: Option<&FieldValue>) -> usize {
    text_of(value).chars().count()
}

/// `local@domain.tld`: one `@`, no whitespace, and a dot inside the domain
fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let local = parts[0];
    let domain = parts[1];

    !local.is_empty()
        && domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
