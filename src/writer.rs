use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes final documents into the output directory with atomic operations.
pub(crate) struct Writer {
    output_dir: PathBuf,
}

impl Writer {
    /// Creates a writer for the given output directory.
    pub(crate) fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Writes a document into the output directory, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the write
    /// fails.
    pub(crate) fn write_document(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::io(&self.output_dir, e))?;

        let path = self.output_dir.join(file_name);
        write_file_atomic(&path, content)?;

        info!("Wrote {}", path.display());
        Ok(path)
    }
}

/// Writes a file atomically.
///
/// Content goes to a temporary sibling first, is synced to disk, then renamed
/// over the target path so an interrupted write never leaves a truncated
/// document behind.
fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    let mut temp_file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    drop(temp_file);

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;

    debug!("Atomic write completed for {}", path.display());
    Ok(())
}
