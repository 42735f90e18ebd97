//! Source tree discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ConvertError;

/// Directories and files below a source root, as paths relative to it.
#[derive(Debug, Default)]
pub(crate) struct SourceTree {
    /// Every sub-directory, parents before children.
    pub dirs: Vec<PathBuf>,
    /// Every non-directory entry, sorted.
    pub files: Vec<PathBuf>,
}

impl SourceTree {
    /// Walk `root` recursively. Hidden entries are skipped.
    pub fn walk(root: &Path) -> Result<Self, ConvertError> {
        let mut tree = Self::default();
        tree.walk_dir(root, Path::new(""))?;
        tree.files.sort();
        Ok(tree)
    }

    fn walk_dir(&mut self, dir: &Path, rel: &Path) -> Result<(), ConvertError> {
        let io_err = |source| ConvertError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut entries: Vec<_> = fs::read_dir(dir)
            .map_err(io_err)?
            .collect::<Result<_, _>>()
            .map_err(io_err)?;
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }
            let child_rel = rel.join(&name);
            // Directories are descended before their entries count as files.
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.dirs.push(child_rel.clone());
                self.walk_dir(&entry.path(), &child_rel)?;
            } else {
                self.files.push(child_rel);
            }
        }
        Ok(())
    }
}
