//! Static site generation for Creeds.
//!
//! [`StaticSiteBuilder`] enumerates every document in a
//! [`Store`](creeds_store::Store), renders each one with the shape its record
//! selects, and writes one HTML page per identifier plus an index page.

mod builder;
mod template;

pub use builder::{BuildConfig, BuildError, BuildReport, FailedPage, PageError, StaticSiteBuilder};
