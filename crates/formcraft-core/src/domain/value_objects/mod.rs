//! Forms value objects

pub mod field;
pub mod validation;
pub mod value;

pub use field::{FieldType, FormField};
pub use validation::{RuleValue, ValidationRule, ValidationType};
pub use value::FieldValue;
