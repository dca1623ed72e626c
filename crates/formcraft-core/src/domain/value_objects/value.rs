//! Field Value Object
//!
//! The value a user enters into a field, or a derivation produces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field value.
///
/// Serialized untagged so JSON scalars and arrays map straight onto the
/// matching variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Options picked in a checkbox group
    Selections(Vec<String>),
}

impl FieldValue {
    /// Empty text or an empty selection
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Selections(items) => items.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Numeric reading of the value, `None` when it is not a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if !n.is_nan() => Some(*n),
            Self::Text(s) => parse_number(s),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn selections(&self) -> Option<&[String]> {
        match self {
            Self::Selections(items) => Some(items),
            _ => None,
        }
    }
}

/// Parse trimmed text as a finite number; blank, NaN and infinities yield `None`.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Text(s) => write!(f, "{}", s),
            Self::Selections(items) => write!(f, "{}", items.join(",")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::Selections(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert!(FieldValue::from("").is_empty());
        assert!(FieldValue::Selections(vec![]).is_empty());
        assert!(!FieldValue::from(" ").is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
        assert!(!FieldValue::Bool(false).is_empty());
    }

    #[test]
    fn test_numeric_reading() {
        assert_eq!(FieldValue::from(" 42 ").as_number(), Some(42.0));
        assert_eq!(FieldValue::from("4.5").as_number(), Some(4.5));
        assert_eq!(FieldValue::from("").as_number(), None);
        assert_eq!(FieldValue::from("abc").as_number(), None);
        assert_eq!(FieldValue::from("NaN").as_number(), None);
        assert_eq!(FieldValue::from("inf").as_number(), None);
        assert_eq!(FieldValue::Bool(true).as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Number(30.0).to_string(), "30");
        assert_eq!(FieldValue::Number(2.5).to_string(), "2.5");
        assert_eq!(
            FieldValue::Selections(vec!["a".into(), "b".into()]).to_string(),
            "a,b"
        );
    }

    #[test]
    fn test_untagged_json() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[true, 3, "x", ["a"]]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Bool(true),
                FieldValue::Number(3.0),
                FieldValue::from("x"),
                FieldValue::Selections(vec!["a".into()]),
            ]
        );
    }
}
