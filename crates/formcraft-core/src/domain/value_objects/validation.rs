//! Validation Rule Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::value::{format_number, parse_number};

/// Kind of constraint a rule applies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationType {
    Required,
    MinLength,
    MaxLength,
    Email,
    Password,
    Min,
    Max,
}

impl ValidationType {
    pub const ALL: [ValidationType; 7] = [
        Self::Required,
        Self::MinLength,
        Self::MaxLength,
        Self::Email,
        Self::Password,
        Self::Min,
        Self::Max,
    ];

    /// Message a freshly configured rule starts with
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Required => "This field is required",
            Self::MinLength => "Value is too short",
            Self::MaxLength => "Value is too long",
            Self::Email => "Invalid email format",
            Self::Password => "Password must be at least 8 characters and contain a number",
            Self::Min => "Value is too small",
            Self::Max => "Value is too large",
        }
    }

    /// Whether the rule compares against a threshold value
    pub fn takes_threshold(&self) -> bool {
        matches!(self, Self::MinLength | Self::MaxLength | Self::Min | Self::Max)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Email => "email",
            Self::Password => "password",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for ValidationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule threshold, stored as entered
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Number(f64),
    Text(String),
}

impl RuleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if !n.is_nan() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => parse_number(s),
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for RuleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A typed constraint with its failure message
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(rename = "type")]
    pub rule_type: ValidationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RuleValue>,
    pub message: String,
}

impl ValidationRule {
    /// Rule carrying the default message for its type
    pub fn new(rule_type: ValidationType, value: Option<RuleValue>) -> Self {
        Self {
            rule_type,
            value,
            message: rule_type.default_message().to_string(),
        }
    }

    pub fn required() -> Self {
        Self::new(ValidationType::Required, None)
    }

    pub fn min_length(len: usize) -> Self {
        Self::new(ValidationType::MinLength, Some(RuleValue::Number(len as f64)))
    }

    pub fn max_length(len: usize) -> Self {
        Self::new(ValidationType::MaxLength, Some(RuleValue::Number(len as f64)))
    }

    pub fn email() -> Self {
        Self::new(ValidationType::Email, None)
    }

    pub fn password() -> Self {
        Self::new(ValidationType::Password, None)
    }

    pub fn min(value: f64) -> Self {
        Self::new(ValidationType::Min, Some(RuleValue::Number(value)))
    }

    pub fn max(value: f64) -> Self {
        Self::new(ValidationType::Max, Some(RuleValue::Number(value)))
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Parsed threshold, `None` when missing or not numeric
    pub fn threshold(&self) -> Option<f64> {
        self.value.as_ref().and_then(RuleValue::as_number)
    }
}
