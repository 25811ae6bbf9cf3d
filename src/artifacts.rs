//! Debug persistence of intermediate artifacts.
//!
//! When enabled, every per-file result is dumped to a side directory under a
//! filename derived from a SHA-256 hash of the file's relative path (not its
//! content), so each source file maps to the same artifact name across runs.

use crate::error::{Error, Result};
use crate::pipeline::PipelineStats;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Returns the deterministic artifact filename for a source path.
#[must_use]
pub(crate) fn stable_artifact_name(source_path: &str, suffix: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_path.as_bytes());
    format!("{:x}{}", hasher.finalize(), suffix)
}

/// Run summary persisted alongside the debug artifacts.
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    task: &'a str,
    generated_at: String,
    #[serde(flatten)]
    stats: &'a PipelineStats,
}

/// Best-effort sink for intermediate artifacts.
///
/// Disabled unless the debug flag is set. Write failures are logged and
/// swallowed: a missing debug dump must never abort the pipeline.
pub(crate) struct DebugSink {
    dir: Option<PathBuf>,
}

impl DebugSink {
    /// Creates a sink that discards everything.
    pub(crate) const fn disabled() -> Self {
        Self { dir: None }
    }

    /// Creates a sink writing into the given directory, creating it if
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub(crate) fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        Ok(Self { dir: Some(dir) })
    }

    /// Saves one per-file artifact under its deterministic name.
    pub(crate) fn save(&self, source_path: &str, suffix: &str, text: &str) {
        let Some(dir) = &self.dir else {
            return;
        };
        let path = dir.join(stable_artifact_name(source_path, suffix));
        if let Err(e) = fs::write(&path, text) {
            warn!("Failed to save debug artifact {}: {}", path.display(), e);
        } else {
            debug!("Saved debug artifact for {} to {}", source_path, path.display());
        }
    }

    /// Saves an explicitly named artifact (e.g. the raw pre-clean-up
    /// document).
    pub(crate) fn save_named(&self, file_name: &str, text: &str) {
        let Some(dir) = &self.dir else {
            return;
        };
        let path = dir.join(file_name);
        if let Err(e) = fs::write(&path, text) {
            warn!("Failed to save debug artifact {}: {}", path.display(), e);
        }
    }

    /// Writes the run summary as `summary.json`.
    pub(crate) fn write_summary(&self, task: &str, stats: &PipelineStats) {
        let Some(dir) = &self.dir else {
            return;
        };
        let summary = RunSummary {
            task,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            stats,
        };
        let path = dir.join("summary.json");
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    warn!("Failed to write {}: {}", path.display(), e);
                }
            }
            Err(e) => warn!("Failed to serialize run summary: {}", e),
        }
    }
}
