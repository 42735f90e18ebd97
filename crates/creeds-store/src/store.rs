//! Store trait and error types.
//!
//! Provides the [`Store`] trait for enumerating and loading records, along with
//! [`StoreError`] for unified error handling across backends.
//!
//! # Identifiers
//!
//! A document identifier is the stored file name without its extension
//! (e.g. `"heidelberg-catechism"`). Identifiers are expected to be unique
//! across categories; backends decide how a collision resolves.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::record::{Record, RecordError};

/// Reference to a stored document, as returned by [`Store::list`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DocumentRef {
    /// Category folder (e.g. "catechisms").
    pub category: String,
    /// Document identifier (e.g. "heidelberg-catechism").
    pub id: String,
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// No category contains the requested identifier.
    NotFound,
    /// Identifier is empty or would escape the data root.
    InvalidId,
    /// Stored record exists but can't be parsed.
    Malformed,
    /// Permission denied.
    PermissionDenied,
    /// Other/unknown error category.
    Other,
}

/// Store error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StoreError {
    /// Semantic error category.
    pub kind: StoreErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Identifier context (if applicable).
    pub id: Option<String>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new store error.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            path: None,
            id: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach identifier context.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error for an identifier.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::NotFound).with_id(id)
    }

    /// Create a malformed-record error from a parse failure.
    #[must_use]
    pub fn malformed(err: RecordError) -> Self {
        Self::new(StoreErrorKind::Malformed).with_source(err)
    }

    /// Create a store error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StoreErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StoreErrorKind::PermissionDenied,
            _ => StoreErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind 'id': message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StoreErrorKind::NotFound => "Not found",
            StoreErrorKind::InvalidId => "Invalid identifier",
            StoreErrorKind::Malformed => "Malformed record",
            StoreErrorKind::PermissionDenied => "Permission denied",
            StoreErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(id) = &self.id {
            write!(f, " '{id}'")?;
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read access to the Document Store.
///
/// Implementations are read-only; records are produced by the converter and
/// never mutated while a site is generated.
pub trait Store: Send + Sync {
    /// Enumerate every stored document across all categories.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store can't be enumerated (e.g. missing
    /// data root, permission denied).
    fn list(&self) -> Result<Vec<DocumentRef>, StoreError>;

    /// Load and parse the record for an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::NotFound`] if no category contains the
    /// identifier, [`StoreErrorKind::Malformed`] if the stored record can't
    /// be parsed.
    fn load(&self, id: &str) -> Result<Record, StoreError>;

    /// Identifiers of every stored document, deduplicated and sorted.
    ///
    /// One page is generated per identifier.
    fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        let ids: BTreeSet<String> = self.list()?.into_iter().map(|r| r.id).collect();
        Ok(ids.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_store_error_new() {
        let err = StoreError::new(StoreErrorKind::NotFound);

        assert_eq!(err.kind, StoreErrorKind::NotFound);
        assert!(err.path.is_none());
        assert!(err.id.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_store_error_with_path() {
        let err = StoreError::new(StoreErrorKind::Other).with_path("/data/creeds");

        assert_eq!(err.path.as_deref(), Some(Path::new("/data/creeds")));
    }

    #[test]
    fn test_store_error_not_found() {
        let err = StoreError::not_found("missing");

        assert_eq!(err.kind, StoreErrorKind::NotFound);
        assert_eq!(err.id.as_deref(), Some("missing"));
    }

    #[test]
    fn test_store_error_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = StoreError::io(io_err, None);

        assert_eq!(err.kind, StoreErrorKind::PermissionDenied);
        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_store_error_malformed_keeps_source() {
        let record_err = Record::from_json("{").unwrap_err();
        let err = StoreError::malformed(record_err);

        assert_eq!(err.kind, StoreErrorKind::Malformed);
        assert!(err.downcast_source::<RecordError>().is_some());
    }

    #[test]
    fn test_store_error_display_simple() {
        let err = StoreError::new(StoreErrorKind::NotFound);

        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_store_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StoreError::new(StoreErrorKind::NotFound)
            .with_backend("Fs")
            .with_id("nicene-creed")
            .with_path("/data/creeds")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found 'nicene-creed': file not found (path: /data/creeds)"
        );
    }

    #[test]
    fn test_store_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreError>();
    }

    struct FixedStore(Vec<DocumentRef>);

    impl Store for FixedStore {
        fn list(&self) -> Result<Vec<DocumentRef>, StoreError> {
            Ok(self.0.clone())
        }

        fn load(&self, id: &str) -> Result<Record, StoreError> {
            Err(StoreError::not_found(id))
        }
    }

    #[test]
    fn test_list_ids_dedupes_and_sorts() {
        let doc = |category: &str, id: &str| DocumentRef {
            category: category.to_owned(),
            id: id.to_owned(),
        };
        let store = FixedStore(vec![
            doc("creeds", "nicene-creed"),
            doc("confessions", "belgic-confession"),
            doc("documents", "nicene-creed"),
        ]);

        assert_eq!(
            store.list_ids().unwrap(),
            vec!["belgic-confession".to_owned(), "nicene-creed".to_owned()]
        );
    }
}
