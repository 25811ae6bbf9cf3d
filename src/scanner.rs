use crate::error::{Error, Result};
use crate::file::SourceFile;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Scans a directory tree for files matching a fixed extension allow-list.
///
/// The walk is sequential and exhaustive: hidden and build directories are
/// traversed like any other, symlinks are not followed, and there is no size
/// filtering. Results are sorted by relative path so the order is stable
/// across runs against an unchanged filesystem.
pub(crate) struct Scanner {
    root_dir: PathBuf,
    extensions: &'static HashSet<&'static str>,
}

impl Scanner {
    /// Creates a scanner for the given root and allow-list.
    pub(crate) fn new(root_dir: &Path, extensions: &'static HashSet<&'static str>) -> Self {
        Self {
            root_dir: root_dir.to_path_buf(),
            extensions,
        }
    }

    /// Scans the root directory and returns all matching files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFiles`] if no file under the root matches the
    /// allow-list.
    pub(crate) fn scan(&self) -> Result<Vec<SourceFile>> {
        debug!("Scanning {} for relevant files", self.root_dir.display());

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root_dir).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Walk error: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
                continue;
            };
            if !self.extensions.contains(extension) {
                trace!("Skipping {} (extension not in allow-list)", path.display());
                continue;
            }

            let relative_path = pathdiff::diff_paths(path, &self.root_dir)
                .unwrap_or_else(|| path.to_path_buf())
                .to_string_lossy()
                .to_string();

            files.push(SourceFile::new(
                path.to_path_buf(),
                relative_path,
                extension.to_string(),
            ));
        }

        // Sort for deterministic ordering
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        if files.is_empty() {
            return Err(Error::no_files(&self.root_dir));
        }

        debug!("Found {} relevant files", files.len());
        Ok(files)
    }
}
