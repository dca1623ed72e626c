//! Domain Services
//!
//! Stateless rules evaluated against field definitions and entered values.

pub mod validation;
pub mod derivation;

pub use validation::validate;
pub use derivation::{derive_value, DerivationRegistry, Formula, AGE_FROM_DOB};
