use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Extensions eligible for documentation generation: source, configuration,
/// schema, and prose documentation files.
pub(crate) static DOCS_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "java", "xml", "properties", "yml", "yaml", "sql", "md", "adoc",
    ]
    .into_iter()
    .collect()
});

/// Extensions eligible for diagram generation: source, configuration, schema,
/// and view templates.
pub(crate) static DIAGRAM_EXTENSIONS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["java", "xml", "sql", "xhtml"].into_iter().collect());

/// Extensions eligible for modernization analysis: source and configuration
/// only, no prose documentation.
pub(crate) static MODERNIZE_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["java", "xml", "properties", "yml", "yaml", "sql"]
        .into_iter()
        .collect()
});

/// A file discovered by the scanner. Content is read later, one file at a
/// time, by the per-file stage.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Absolute path to the file
    pub absolute_path: PathBuf,

    /// Path relative to the scan root
    pub relative_path: String,

    /// File extension (without the leading dot)
    pub extension: String,
}

impl SourceFile {
    /// Creates a new source file record.
    #[must_use]
    pub fn new(absolute_path: PathBuf, relative_path: String, extension: String) -> Self {
        Self {
            absolute_path,
            relative_path,
            extension,
        }
    }

    /// Reads the full text content of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or not UTF-8.
    pub fn read_content(&self) -> Result<String> {
        fs::read_to_string(&self.absolute_path).map_err(|e| Error::io(&self.absolute_path, e))
    }
}
