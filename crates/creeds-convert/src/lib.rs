//! YAML to JSON record converter for Creeds.
//!
//! Walks a source tree of YAML documents and writes one normalized JSON record
//! per document into the Document Store, mirroring the folder hierarchy:
//!
//! ```text
//! source/creeds/nicene-creed.yaml  ->  data/creeds/nicene-creed.json
//! ```
//!
//! A file that can't be parsed is reported and skipped; its siblings are still
//! converted. Only a missing source root aborts the run.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use creeds_convert::{convert, ConvertOptions};
//!
//! let report = convert(Path::new("source"), Path::new("data"), &ConvertOptions::default())?;
//! println!("{} converted, {} failed", report.converted.len(), report.failed.len());
//! ```

mod normalize;
mod walk;

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

pub use normalize::{NormalizeError, normalize};
use walk::SourceTree;

/// Source file extensions the converter reads.
const SOURCE_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Presentational fields removed when no list is configured.
pub const DEFAULT_STRIP_FIELDS: &[&str] = &["format", "formatting", "style", "class", "classes"];

/// Options for [`convert`].
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// Mapping keys removed from every level of each document.
    pub strip_fields: Vec<String>,
    /// Parse and normalize without writing anything.
    pub dry_run: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            strip_fields: DEFAULT_STRIP_FIELDS.iter().map(|f| (*f).to_owned()).collect(),
            dry_run: false,
        }
    }
}

/// Error that aborts the whole conversion run.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Source root does not exist or is not a directory.
    #[error("Source directory not found: {}", .0.display())]
    SourceRootMissing(PathBuf),
    /// A directory could not be read or mirrored.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error for a single source file. The file is skipped; the run continues.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Failed to read source: {0}")]
    Read(#[source] std::io::Error),
    /// Source is not valid YAML.
    #[error("Malformed source: {0}")]
    MalformedSource(#[from] serde_yaml::Error),
    /// Source parsed but contains no document.
    #[error("Malformed source: empty document")]
    Empty,
    #[error("Malformed source: {0}")]
    Normalize(#[from] NormalizeError),
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write record: {0}")]
    Write(#[source] std::io::Error),
}

/// A source file that could not be converted.
#[derive(Debug)]
pub struct FailedFile {
    pub source: PathBuf,
    pub error: FileError,
}

/// Outcome of a conversion run.
#[derive(Debug, Default)]
pub struct ConvertReport {
    /// Destination paths written (or that would be written in a dry run).
    pub converted: Vec<PathBuf>,
    /// Source files that failed, in path order.
    pub failed: Vec<FailedFile>,
    /// Files ignored because of their extension.
    pub skipped: Vec<PathBuf>,
    /// Converted records written directly under the destination root. The
    /// document store only lists records inside a category folder, so these
    /// won't be published.
    pub uncategorized: Vec<PathBuf>,
}

impl ConvertReport {
    /// Whether every source file converted.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Convert every YAML file under `source_root` into a JSON record under
/// `dest_root`.
///
/// Directories are mirrored first, then files are converted in parallel.
///
/// # Errors
///
/// Returns [`ConvertError::SourceRootMissing`] if `source_root` is not a
/// directory, [`ConvertError::Io`] if the tree can't be walked or a
/// destination directory can't be created. Per-file failures are collected in
/// the report instead.
pub fn convert(
    source_root: &Path,
    dest_root: &Path,
    options: &ConvertOptions,
) -> Result<ConvertReport, ConvertError> {
    if !source_root.is_dir() {
        return Err(ConvertError::SourceRootMissing(source_root.to_path_buf()));
    }

    let tree = SourceTree::walk(source_root)?;
    tracing::info!(
        source = %source_root.display(),
        dest = %dest_root.display(),
        files = tree.files.len(),
        "Converting source tree"
    );

    if !options.dry_run {
        for dir in std::iter::once(Path::new("")).chain(tree.dirs.iter().map(PathBuf::as_path)) {
            let target = dest_root.join(dir);
            fs::create_dir_all(&target).map_err(|source| ConvertError::Io {
                path: target.clone(),
                source,
            })?;
        }
    }

    let (sources, skipped): (Vec<_>, Vec<_>) = tree
        .files
        .into_iter()
        .partition(|rel| is_source_file(rel));
    for rel in &skipped {
        tracing::debug!(path = %rel.display(), "Skipping non-YAML file");
    }

    let results: Vec<(PathBuf, Result<PathBuf, FileError>)> = sources
        .par_iter()
        .map(|rel| {
            let source = source_root.join(rel);
            let dest = dest_root.join(rel).with_extension("json");
            let result = convert_file(&source, &dest, options).map(|()| dest);
            (source, result)
        })
        .collect();

    let mut report = ConvertReport {
        skipped: skipped.into_iter().map(|rel| source_root.join(rel)).collect(),
        ..ConvertReport::default()
    };
    for (source, result) in results {
        match result {
            Ok(dest) => {
                if dest.parent() == Some(dest_root) {
                    tracing::warn!(
                        path = %source.display(),
                        "Source file is outside a category folder and won't be listed"
                    );
                    report.uncategorized.push(dest.clone());
                }
                report.converted.push(dest);
            }
            Err(error) => {
                tracing::warn!(path = %source.display(), error = %error, "Failed to convert source");
                report.failed.push(FailedFile { source, error });
            }
        }
    }

    Ok(report)
}

/// Convert a single YAML file to a JSON record at `dest`.
///
/// Nothing is written unless the whole document parses and normalizes.
///
/// # Errors
///
/// Returns [`FileError`] describing the stage that failed.
pub fn convert_file(source: &Path, dest: &Path, options: &ConvertOptions) -> Result<(), FileError> {
    let content = fs::read_to_string(source).map_err(FileError::Read)?;
    let json = yaml_to_json(&content, &options.strip_fields)?;
    let serialized = serde_json::to_string(&json)?;

    if options.dry_run {
        return Ok(());
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(FileError::Write)?;
    }
    fs::write(dest, serialized).map_err(FileError::Write)
}

/// Parse YAML text and normalize it into a JSON value.
///
/// # Errors
///
/// Returns [`FileError::MalformedSource`] for invalid YAML and
/// [`FileError::Empty`] when the text holds no document.
pub fn yaml_to_json(content: &str, strip_fields: &[String]) -> Result<serde_json::Value, FileError> {
    if content.trim().is_empty() {
        return Err(FileError::Empty);
    }
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    if yaml.is_null() {
        return Err(FileError::Empty);
    }
    Ok(normalize(yaml, strip_fields)?)
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
}
