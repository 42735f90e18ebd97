//! Static site builder.
//!
//! Pages are generated in parallel. A document that fails to load is reported
//! in [`BuildReport::failed`]; the remaining pages are still written.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use creeds_renderer::{RenderOptions, Rendered, render, title_case};
use creeds_store::{Store, StoreError};
use rayon::prelude::*;

use crate::template::{CategoryData, LinkData, PageData, render_index, render_page};

/// Route prefix under which document pages are written.
const PAGE_ROUTE: &str = "confession";

/// Configuration for static site building.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Title shown on the index page and in every page title.
    pub site_title: String,
    pub render: RenderOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            site_title: "Creeds".to_owned(),
            render: RenderOptions::default(),
        }
    }
}

/// Error that aborts the whole build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The store could not be enumerated.
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error for a single page. Other pages are unaffected.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("{0}")]
    Load(#[from] StoreError),
    #[error("Failed to write page: {0}")]
    Write(#[source] std::io::Error),
}

/// A document whose page could not be generated.
#[derive(Debug)]
pub struct FailedPage {
    pub id: String,
    pub error: PageError,
}

/// Outcome of a build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Written page files, in identifier order.
    pub pages: Vec<PathBuf>,
    /// Identifiers whose record has an unrecognized type. Their pages hold
    /// the "not found" placeholder.
    pub placeholders: Vec<String>,
    pub failed: Vec<FailedPage>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A page that rendered and was written.
struct BuiltPage {
    path: PathBuf,
    title: String,
    placeholder: bool,
}

/// Builds the static site from a store.
pub struct StaticSiteBuilder {
    store: Arc<dyn Store>,
    config: BuildConfig,
}

impl StaticSiteBuilder {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: BuildConfig) -> Self {
        Self { store, config }
    }

    /// Output path of the page for `id`, relative to the output directory.
    pub fn page_path(id: &str) -> PathBuf {
        Path::new(PAGE_ROUTE).join(id).join("index.html")
    }

    /// Generate every page and the index into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Store`] if the store can't be enumerated and
    /// [`BuildError::Io`] if the output directory or index can't be written.
    /// Per-page failures are collected in the report.
    pub fn build(&self, output_dir: &Path) -> Result<BuildReport, BuildError> {
        let documents = self.store.list()?;
        let ids = self.store.list_ids()?;
        tracing::info!(
            documents = ids.len(),
            output = %output_dir.display(),
            "Building site"
        );

        fs::create_dir_all(output_dir).map_err(|source| BuildError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let results: Vec<(String, Result<BuiltPage, PageError>)> = ids
            .par_iter()
            .map(|id| (id.clone(), self.build_page(id, output_dir)))
            .collect();

        let mut report = BuildReport::default();
        let mut titles: BTreeMap<String, String> = BTreeMap::new();
        for (id, result) in results {
            match result {
                Ok(page) => {
                    if page.placeholder {
                        tracing::warn!(id = %id, "Unrecognized record type, wrote placeholder");
                        report.placeholders.push(id.clone());
                    }
                    titles.insert(id, page.title);
                    report.pages.push(page.path);
                }
                Err(error) => {
                    tracing::warn!(id = %id, error = %error, "Failed to build page");
                    report.failed.push(FailedPage { id, error });
                }
            }
        }

        // First category wins for identifiers present in several.
        let mut categories: BTreeMap<String, Vec<LinkData>> = BTreeMap::new();
        for doc in documents {
            if let Some(title) = titles.remove(&doc.id) {
                categories.entry(doc.category).or_default().push(LinkData {
                    title,
                    href: format!("{PAGE_ROUTE}/{}/", doc.id),
                });
            }
        }
        let categories: Vec<CategoryData> = categories
            .into_iter()
            .map(|(name, documents)| CategoryData { name, documents })
            .collect();

        let index_path = output_dir.join("index.html");
        fs::write(&index_path, render_index(&self.config.site_title, &categories)).map_err(
            |source| BuildError::Io {
                path: index_path.clone(),
                source,
            },
        )?;

        tracing::info!(
            pages = report.pages.len(),
            failed = report.failed.len(),
            "Site build finished"
        );
        Ok(report)
    }

    fn build_page(&self, id: &str, output_dir: &Path) -> Result<BuiltPage, PageError> {
        let record = self.store.load(id)?;
        let rendered = render(&record, &self.config.render);
        let placeholder = matches!(rendered, Rendered::NotFound);
        let title = record.name().map(title_case).unwrap_or_else(|| title_case(id));

        let body_html = rendered.into_element().to_html();
        let html = render_page(&PageData {
            title: &title,
            site_title: &self.config.site_title,
            body_html: &body_html,
            home_href: "../../",
        });

        let path = output_dir.join(Self::page_path(id));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(PageError::Write)?;
        }
        fs::write(&path, html).map_err(PageError::Write)?;
        tracing::debug!(id = %id, path = %path.display(), "Wrote page");

        Ok(BuiltPage {
            path,
            title,
            placeholder,
        })
    }
}
