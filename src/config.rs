use crate::error::{Error, Result};
use std::path::PathBuf;

/// Sampling temperature used for every generation call.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

const DEFAULT_OUTPUT_DIR: &str = "docs";
const DEFAULT_OUTPUT_FILE: &str = "project.md";
const DEFAULT_PER_FILE_MODEL: &str = "gpt-4.1-nano";
const DEFAULT_REDUCE_MODEL: &str = "gpt-4o-mini";

/// Configuration for one pipeline run.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Root directory to scan for files
    pub root_dir: PathBuf,

    /// Output directory for generated documents
    pub output_dir: PathBuf,

    /// Name of the primary output document
    pub output_file: String,

    /// Previously generated project documentation, used as context by the
    /// modernization task
    pub doc_path: Option<PathBuf>,

    /// Dump intermediate artifacts and a run summary under the output
    /// directory
    pub debug: bool,

    /// Model for per-file requests
    pub per_file_model: String,

    /// Model for combine/refine requests
    pub reduce_model: String,

    /// Sampling temperature for every request
    pub temperature: f32,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use codescribe::Config;
    ///
    /// let config = Config::builder()
    ///     .root_dir(".")
    ///     .output_dir("docs")
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Root directory doesn't exist or is not a directory
    /// - The output file name is empty
    /// - A documentation context path is set but missing
    pub fn validate(&self) -> Result<()> {
        if !self.root_dir.exists() {
            return Err(Error::config(format!(
                "Root directory does not exist: {}",
                self.root_dir.display()
            )));
        }

        if !self.root_dir.is_dir() {
            return Err(Error::config(format!(
                "Root path is not a directory: {}",
                self.root_dir.display()
            )));
        }

        if self.output_file.trim().is_empty() {
            return Err(Error::config("Output file name must not be empty"));
        }

        if let Some(doc_path) = &self.doc_path {
            if !doc_path.is_file() {
                return Err(Error::config(format!(
                    "Documentation file does not exist: {}",
                    doc_path.display()
                )));
            }
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::config(format!(
                "Temperature {} is outside the supported range 0.0..=2.0",
                self.temperature
            )));
        }

        Ok(())
    }

    /// Returns the debug directory for a task, under the output directory.
    #[must_use]
    pub fn debug_dir(&self, task: &str) -> PathBuf {
        self.output_dir.join("debug").join(task)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            doc_path: None,
            debug: false,
            per_file_model: DEFAULT_PER_FILE_MODEL.to_string(),
            reduce_model: DEFAULT_REDUCE_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    root_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    output_file: Option<String>,
    doc_path: Option<PathBuf>,
    debug: bool,
    per_file_model: Option<String>,
    reduce_model: Option<String>,
    temperature: Option<f32>,
}

impl ConfigBuilder {
    /// Sets the root directory to scan.
    #[must_use]
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(path.into());
        self
    }

    /// Sets the output directory for generated documents.
    #[must_use]
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Sets the name of the primary output document.
    #[must_use]
    pub fn output_file(mut self, name: impl Into<String>) -> Self {
        self.output_file = Some(name.into());
        self
    }

    /// Sets the project documentation file used as modernization context.
    #[must_use]
    pub fn doc_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.doc_path = Some(path.into());
        self
    }

    /// Enables intermediate-artifact dumps.
    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Sets the model for per-file requests.
    #[must_use]
    pub fn per_file_model(mut self, model: impl Into<String>) -> Self {
        self.per_file_model = Some(model.into());
        self
    }

    /// Sets the model for combine/refine requests.
    #[must_use]
    pub fn reduce_model(mut self, model: impl Into<String>) -> Self {
        self.reduce_model = Some(model.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            root_dir: self.root_dir.unwrap_or_else(|| PathBuf::from(".")),
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            output_file: self
                .output_file
                .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string()),
            doc_path: self.doc_path,
            debug: self.debug,
            per_file_model: self
                .per_file_model
                .unwrap_or_else(|| DEFAULT_PER_FILE_MODEL.to_string()),
            reduce_model: self
                .reduce_model
                .unwrap_or_else(|| DEFAULT_REDUCE_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_default_config() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = Config::builder().root_dir(temp.path()).build().unwrap();

        assert_eq!(config.output_file, DEFAULT_OUTPUT_FILE);
        assert_eq!(config.per_file_model, DEFAULT_PER_FILE_MODEL);
        assert!((config.temperature - DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
        assert!(!config.debug);
    }

    #[test]
    fn test_invalid_root_dir() {
        let result = Config::builder()
            .root_dir("/nonexistent/path/that/should/not/exist")
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_empty_output_file_rejected() {
        let temp = assert_fs::TempDir::new().unwrap();

        let result = Config::builder()
            .root_dir(temp.path())
            .output_file("  ")
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_missing_doc_path_rejected() {
        let temp = assert_fs::TempDir::new().unwrap();

        let result = Config::builder()
            .root_dir(temp.path())
            .doc_path(temp.path().join("project.md"))
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_existing_doc_path_accepted() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("project.md").write_str("= Project").unwrap();

        let config = Config::builder()
            .root_dir(temp.path())
            .doc_path(temp.path().join("project.md"))
            .build()
            .unwrap();

        assert!(config.doc_path.is_some());
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        let temp = assert_fs::TempDir::new().unwrap();

        let result = Config::builder()
            .root_dir(temp.path())
            .temperature(3.5)
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_debug_dir_is_task_scoped() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = Config::builder()
            .root_dir(temp.path())
            .output_dir(temp.path().join("docs"))
            .build()
            .unwrap();

        assert_eq!(
            config.debug_dir("short_docs"),
            temp.path().join("docs").join("debug").join("short_docs")
        );
    }
}
