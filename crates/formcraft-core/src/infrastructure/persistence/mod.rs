//! Persistence adapters
//!
//! Key-value stores (in-memory and single-file JSON) and the form catalogue
//! kept as one JSON array inside them.

pub mod file;
pub mod forms;
pub mod memory;

pub use file::FileKeyValueStore;
pub use forms::{LocalFormStorage, FORMS_KEY};
pub use memory::InMemoryKeyValueStore;
