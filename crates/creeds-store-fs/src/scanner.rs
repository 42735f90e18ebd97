//! Record discovery by walking the data directory.
//!
//! The data directory holds one folder per category. Record files may sit at
//! any depth inside a category folder; the top-level folder names the
//! category and the file stem is the id. The Scanner only locates files;
//! reading and parsing is left to `FsStore`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension of stored record files.
const RECORD_EXTENSION: &str = "json";

/// Location of one stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordFile {
    /// Category folder name (e.g. "creeds").
    pub category: String,
    /// File stem (e.g. "nicene-creed").
    pub id: String,
    pub path: PathBuf,
}

/// Discovers record files below a data directory.
pub(crate) struct Scanner<'a> {
    data_dir: &'a Path,
}

impl<'a> Scanner<'a> {
    pub fn new(data_dir: &'a Path) -> Self {
        Self { data_dir }
    }

    /// Category folders directly below the data directory, sorted by name.
    ///
    /// Hidden folders are skipped.
    pub fn categories(&self) -> io::Result<Vec<(String, PathBuf)>> {
        let mut categories: Vec<_> = fs::read_dir(self.data_dir)?
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
            .map(|e| (e.file_name().to_string_lossy().into_owned(), e.path()))
            .filter(|(name, _)| !name.starts_with('.'))
            .collect();
        categories.sort();
        Ok(categories)
    }

    /// Every record file, sorted by category, then id, then path.
    ///
    /// # Errors
    ///
    /// Fails if the data directory itself can't be read. Unreadable folders
    /// inside a category are logged and skipped.
    pub fn scan(&self) -> io::Result<Vec<RecordFile>> {
        let mut files = Vec::new();
        for (category, dir) in self.categories()? {
            scan_dir(&category, &dir, &mut files);
        }
        files.sort_by(|a, b| (&a.category, &a.id, &a.path).cmp(&(&b.category, &b.id, &b.path)));
        Ok(files)
    }
}

/// Collect record files below `dir`, recursing into sub-folders.
fn scan_dir(category: &str, dir: &Path, files: &mut Vec<RecordFile>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Failed to read directory");
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            tracing::debug!(path = %path.display(), category, "Scanning nested folder");
            scan_dir(category, &path, files);
        } else if let Some(id) = id_from_file_name(&name) {
            files.push(RecordFile {
                category: category.to_owned(),
                id: id.to_owned(),
                path,
            });
        }
    }
}

/// Strip the record extension from a file name.
///
/// Returns `None` for files that aren't records.
pub(crate) fn id_from_file_name(name: &str) -> Option<&str> {
    name.strip_suffix(RECORD_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .filter(|id| !id.is_empty())
}
