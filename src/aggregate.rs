//! Whole-collection reduction calls: combine many per-file fragments into a
//! single document, optionally followed by a clean-up or simplify pass.

use crate::client::TextGenerator;
use crate::transform::TransformResult;
use tracing::{debug, warn};

/// Joins per-file fragments with a blank-line separator.
///
/// This is both the user prompt for the combine call and the fallback output
/// when that call fails.
#[must_use]
pub(crate) fn join_fragments(fragments: &[TransformResult]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Runs the reduction calls against the generation service.
///
/// Every reduction degrades rather than fails: a combine error falls back to
/// the raw join of its inputs, a refine error falls back to the unrefined
/// document, so the pipeline always produces output.
pub(crate) struct Aggregator<'a> {
    generator: &'a dyn TextGenerator,
    model: &'a str,
    temperature: f32,
}

impl<'a> Aggregator<'a> {
    pub(crate) fn new(generator: &'a dyn TextGenerator, model: &'a str, temperature: f32) -> Self {
        Self {
            generator,
            model,
            temperature,
        }
    }

    /// Merges all fragments into one document.
    ///
    /// The concatenated input is passed through unbounded; no chunking is
    /// applied.
    pub(crate) fn combine(&self, system_prompt: &str, fragments: &[TransformResult]) -> String {
        let joined = join_fragments(fragments);
        debug!(
            fragments = fragments.len(),
            chars = joined.len(),
            "combining fragments"
        );
        match self
            .generator
            .generate(system_prompt, &joined, self.model, self.temperature)
        {
            Ok(text) => text,
            Err(err) => {
                warn!("Combine call failed, falling back to raw join: {}", err);
                joined
            }
        }
    }

    /// Second reduction pass over an already-combined document (clean-up or
    /// simplify), operating on it as a single text blob.
    pub(crate) fn refine(&self, system_prompt: &str, document: &str) -> String {
        match self
            .generator
            .generate(system_prompt, document, self.model, self.temperature)
        {
            Ok(text) => text,
            Err(err) => {
                warn!("Refine call failed, keeping document unchanged: {}", err);
                document.to_string()
            }
        }
    }
}
