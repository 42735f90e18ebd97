//! Filesystem document store for Creeds.
//!
//! This crate provides [`FsStore`], a filesystem-based implementation of the
//! [`Store`](creeds_store::Store) trait over the converter's output layout:
//!
//! ```text
//! data/
//!   catechisms/heidelberg-catechism.json
//!   creeds/nicene-creed.json
//!   creeds/ancient/athanasian-creed.json
//! ```
//!
//! The top-level folder is the category; deeper folders only group files.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use creeds_store::Store;
//! use creeds_store_fs::FsStore;
//!
//! let store = FsStore::new(PathBuf::from("data"));
//! for id in store.list_ids()? {
//!     let record = store.load(&id)?;
//! }
//! ```

mod scanner;

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use creeds_store::{DocumentRef, Record, Store, StoreError, StoreErrorKind};
use scanner::{RecordFile, Scanner};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Document store backed by a directory of category folders.
#[derive(Debug, Clone)]
pub struct FsStore {
    data_dir: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `data_dir`.
    ///
    /// The directory isn't touched until the store is queried.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Find the file holding `id`.
    ///
    /// Category folders are visited in sorted order, including their
    /// sub-folders; the first record file named `<id>.json` wins.
    fn locate(&self, id: &str) -> Result<PathBuf, StoreError> {
        validate_id(id)?;

        self.scan()?
            .into_iter()
            .find(|file| file.id == id)
            .map(|file| file.path)
            .ok_or_else(|| StoreError::not_found(id).with_backend(BACKEND))
    }

    fn scan(&self) -> Result<Vec<RecordFile>, StoreError> {
        Scanner::new(&self.data_dir)
            .scan()
            .map_err(|e| StoreError::io(e, Some(self.data_dir.clone())).with_backend(BACKEND))
    }
}

/// Reject identifiers that are empty or could escape a category folder.
fn validate_id(id: &str) -> Result<(), StoreError> {
    if id.is_empty() || id.starts_with('.') || id.contains(['/', '\\']) {
        return Err(StoreError::new(StoreErrorKind::InvalidId)
            .with_id(id)
            .with_backend(BACKEND));
    }
    Ok(())
}

impl Store for FsStore {
    fn list(&self) -> Result<Vec<DocumentRef>, StoreError> {
        let files = self.scan()?;

        tracing::debug!(document_count = files.len(), "Store scan completed");

        Ok(files
            .into_iter()
            .map(|f| {
                tracing::trace!(path = %f.path.display(), "Found record");
                DocumentRef {
                    category: f.category,
                    id: f.id,
                }
            })
            .collect())
    }

    fn load(&self, id: &str) -> Result<Record, StoreError> {
        let path = self.locate(id)?;
        let content = fs::read_to_string(&path)
            .map_err(|e| StoreError::io(e, Some(path.clone())).with_backend(BACKEND))?;
        Record::from_json(&content).map_err(|e| {
            StoreError::malformed(e)
                .with_id(id)
                .with_path(path)
                .with_backend(BACKEND)
        })
    }

    fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut ids = Vec::new();
        for doc in self.list()? {
            if let Some(first) = seen.get(&doc.id) {
                tracing::warn!(
                    id = %doc.id,
                    kept = %first,
                    shadowed = %doc.category,
                    "Document identifier exists in more than one category"
                );
                continue;
            }
            seen.insert(doc.id.clone(), doc.category);
            ids.push(doc.id);
        }
        ids.sort();
        Ok(ids)
    }
}
