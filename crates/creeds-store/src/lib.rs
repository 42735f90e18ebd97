//! Record model and document store abstraction for Creeds.
//!
//! This crate provides:
//!
//! - [`Record`]: a confessional document parsed into a sum type, one variant
//!   per document shape. Shape detection happens once, at parse time.
//! - [`Store`]: the trait the site builder uses to enumerate and load records,
//!   regardless of where they live.
//! - [`MockStore`]: an in-memory store for tests (behind the `mock` feature).
//!
//! # Example
//!
//! ```
//! use creeds_store::{Record, RecordKind};
//!
//! let record = Record::from_json(
//!     r#"{"type": "creed", "name": "apostles-creed", "text": "I believe..."}"#,
//! )
//! .unwrap();
//! assert_eq!(record.kind(), Some(RecordKind::Creed));
//! assert_eq!(record.name(), Some("apostles-creed"));
//! ```

#[cfg(feature = "mock")]
mod mock;
mod record;
mod store;

#[cfg(feature = "mock")]
pub use mock::MockStore;
pub use record::{
    Article, Catechism, CatechismBody, Chapter, ChapterBody, Confession, Creed, Day,
    DocumentEntry, HistoricalDocument, Label, Question, Record, RecordError, RecordKind,
    Section, Verses,
};
pub use store::{DocumentRef, Store, StoreError, StoreErrorKind};
