//! Mock store implementation for testing.
//!
//! Provides [`MockStore`] for unit testing without filesystem access.

use std::collections::BTreeMap;

use crate::record::Record;
use crate::store::{DocumentRef, Store, StoreError};

/// Mock store for testing.
///
/// Holds raw JSON per document so tests can exercise both the happy path and
/// malformed records. Use the builder methods to configure it.
///
/// # Example
///
/// ```ignore
/// use creeds_store::{MockStore, Store};
///
/// let store = MockStore::new().with_json(
///     "creeds",
///     "apostles-creed",
///     r#"{"type": "creed", "name": "apostles-creed", "text": "I believe..."}"#,
/// );
///
/// let record = store.load("apostles-creed").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    documents: BTreeMap<DocumentRef, String>,
}

impl MockStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document from its raw JSON.
    #[must_use]
    pub fn with_json(
        mut self,
        category: impl Into<String>,
        id: impl Into<String>,
        json: impl Into<String>,
    ) -> Self {
        let doc = DocumentRef {
            category: category.into(),
            id: id.into(),
        };
        self.documents.insert(doc, json.into());
        self
    }
}

impl Store for MockStore {
    fn list(&self) -> Result<Vec<DocumentRef>, StoreError> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn load(&self, id: &str) -> Result<Record, StoreError> {
        let (_, json) = self
            .documents
            .iter()
            .find(|(doc, _)| doc.id == id)
            .ok_or_else(|| StoreError::not_found(id).with_backend("Mock"))?;
        Record::from_json(json)
            .map_err(|e| StoreError::malformed(e).with_backend("Mock").with_id(id))
    }
}
