//! Per-file generation operations: one request/response cycle producing text
//! derived from a single file's content.

use crate::category::Category;
use crate::client::TextGenerator;
use crate::error::Result;
use crate::file::SourceFile;
use crate::prompts;
use tracing::warn;

/// Outcome of one per-file operation.
///
/// The pipeline collects exactly one of these per scanned file, in scan
/// order: a failed operation yields a placeholder carrying the error message,
/// never an omission, so downstream aggregation receives a value for every
/// file.
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// Relative path of the file this result was derived from
    pub source_path: String,

    /// Generated text, or the inline error placeholder
    pub text: String,

    /// Whether the operation succeeded
    pub succeeded: bool,
}

impl TransformResult {
    /// Creates a successful result.
    #[must_use]
    pub fn ok(source_path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            text: text.into(),
            succeeded: true,
        }
    }

    /// Creates a placeholder result for a failed operation.
    #[must_use]
    pub fn placeholder(source_path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            text: text.into(),
            succeeded: false,
        }
    }
}

/// Runs the per-file operations against the generation service.
pub(crate) struct Transformer<'a> {
    generator: &'a dyn TextGenerator,
    model: &'a str,
    temperature: f32,
}

impl<'a> Transformer<'a> {
    pub(crate) fn new(generator: &'a dyn TextGenerator, model: &'a str, temperature: f32) -> Self {
        Self {
            generator,
            model,
            temperature,
        }
    }

    /// Classifies a file into the closed category set.
    ///
    /// A service failure is not a record failure: the file silently falls
    /// back to [`Category::Other`], with a warning.
    pub(crate) fn categorize(&self, file: &SourceFile, content: &str) -> Category {
        let user = prompts::file_user_prompt(&file.relative_path, content);
        match self
            .generator
            .generate(prompts::CATEGORIZE_SYSTEM, &user, self.model, self.temperature)
        {
            Ok(raw) => Category::parse(&raw),
            Err(err) => {
                warn!("Error categorizing {}: {}", file.relative_path, err);
                Category::Other
            }
        }
    }

    /// Generates a short documentation fragment for a file.
    ///
    /// The system prompt is stricter (public surface only) for the API /
    /// Data Model / Business Logic categories.
    pub(crate) fn short_doc(
        &self,
        file: &SourceFile,
        content: &str,
        category: Category,
    ) -> Result<String> {
        let system = if category.is_public_surface() {
            prompts::SHORT_DOC_PUBLIC_SURFACE_SYSTEM
        } else {
            prompts::SHORT_DOC_BRIEF_SYSTEM
        };
        let user = prompts::categorized_file_user_prompt(&file.relative_path, category, content);
        self.generator
            .generate(system, &user, self.model, self.temperature)
    }

    /// Generates a Mermaid diagram description for a file.
    pub(crate) fn file_diagram(&self, file: &SourceFile, content: &str) -> Result<String> {
        let user = prompts::file_user_prompt(&file.relative_path, content);
        self.generator
            .generate(prompts::FILE_DIAGRAM_SYSTEM, &user, self.model, self.temperature)
    }

    /// Generates a modernization analysis for a file, with the whole
    /// project's documentation as extra context.
    pub(crate) fn modernization(
        &self,
        file: &SourceFile,
        content: &str,
        project_doc: &str,
    ) -> Result<String> {
        let user = prompts::modernization_user_prompt(project_doc, &file.relative_path, content);
        self.generator
            .generate(prompts::MODERNIZATION_SYSTEM, &user, self.model, self.temperature)
    }
}
