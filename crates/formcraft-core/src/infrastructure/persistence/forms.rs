//! Form catalogue stored as a JSON array under a single key

use chrono::Utc;

use crate::domain::aggregates::{FormDraft, FormSchema};
use crate::ports::outbound::{FormRepository, KeyValueStore, RepoResult};

/// Storage key holding the serialized form list
pub const FORMS_KEY: &str = "formBuilderForms";

/// Form repository over any key-value store
#[derive(Debug, Default)]
pub struct LocalFormStorage<S> {
    store: S,
}

impl<S: KeyValueStore> LocalFormStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whole list; missing or corrupt data reads as empty
    fn read_forms(&self) -> RepoResult<Vec<FormSchema>> {
        let Some(json) = self.store.get(FORMS_KEY)? else {
            return Ok(vec![]);
        };
        match serde_json::from_str(&json) {
            Ok(forms) => Ok(forms),
            Err(e) => {
                tracing::warn!(key = FORMS_KEY, error = %e, "stored form list is corrupt, treating as empty");
                Ok(vec![])
            }
        }
    }

    fn write_forms(&self, forms: &[FormSchema]) -> RepoResult<()> {
        let json = serde_json::to_string(forms)?;
        self.store.set(FORMS_KEY, json)
    }
}

impl<S: KeyValueStore> FormRepository for LocalFormStorage<S> {
    fn list(&self) -> RepoResult<Vec<FormSchema>> {
        self.read_forms()
    }

    fn get_by_id(&self, id: &str) -> RepoResult<Option<FormSchema>> {
        Ok(self.read_forms()?.into_iter().find(|f| f.id == id))
    }

    fn save(&self, draft: &FormDraft) -> RepoResult<FormSchema> {
        let mut forms = self.read_forms()?;
        let schema = FormSchema::from_draft(draft.clone(), Utc::now());
        forms.push(schema.clone());
        self.write_forms(&forms)?;
        Ok(schema)
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        let mut forms = self.read_forms()?;
        let before = forms.len();
        forms.retain(|f| f.id != id);
        if forms.len() != before {
            self.write_forms(&forms)?;
        }
        Ok(())
    }
}
