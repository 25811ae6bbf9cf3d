use crate::aggregate::Aggregator;
use crate::artifacts::DebugSink;
use crate::client::TextGenerator;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::file::{self, SourceFile};
use crate::prompts;
use crate::scanner::Scanner;
use crate::transform::{TransformResult, Transformer};
use crate::writer::Writer;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Statistics collected during pipeline execution.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    /// Number of files matched by the scan
    pub total_files: usize,

    /// Per-file operations that produced an error placeholder
    pub failed_transforms: usize,

    /// Number of documents written to the output directory
    pub files_written: usize,

    /// Time spent scanning
    pub scan_duration: Duration,

    /// Time spent on per-file generation calls
    pub transform_duration: Duration,

    /// Time spent on reduction calls
    pub aggregate_duration: Duration,

    /// Total execution time
    pub duration: Duration,

    /// Output directory path
    pub output_directory: String,
}

/// Main pipeline orchestrator.
///
/// Each task is a strict linear pass: scan, then one generation call per file
/// (collecting a result for every file, placeholder on error), then one or
/// two reduction calls, then write. The generation service is injected so no
/// stage touches process-wide state.
pub struct Pipeline<'a> {
    config: Config,
    generator: &'a dyn TextGenerator,
}

impl<'a> Pipeline<'a> {
    /// Creates a new pipeline with the given configuration and service
    /// handle.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config, generator: &'a dyn TextGenerator) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, generator })
    }

    /// Generates combined project documentation.
    ///
    /// Per file: categorize, then produce a short documentation fragment.
    /// Reduction: combine all fragments, then a clean-up pass, then write the
    /// configured document.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan finds no relevant files or the final
    /// write fails.
    #[instrument(skip(self), fields(root_dir = %self.config.root_dir.display()))]
    pub fn generate_docs(&self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        info!("Stage 1/3: Scanning {}", self.config.root_dir.display());
        let scan_start = Instant::now();
        let files = Scanner::new(&self.config.root_dir, &file::DOCS_EXTENSIONS).scan()?;
        let scan_duration = scan_start.elapsed();
        info!(
            "✓ Found {} relevant files in {:.2}s",
            files.len(),
            scan_duration.as_secs_f64()
        );

        let sink = self.debug_sink("short_docs")?;
        let transformer = Transformer::new(
            self.generator,
            &self.config.per_file_model,
            self.config.temperature,
        );

        info!("Stage 2/3: Generating documentation per file...");
        let transform_start = Instant::now();
        let results = collect_results(&files, &sink, "_short.md", |file| {
            let content = match file.read_content() {
                Ok(content) => content,
                Err(err) => {
                    warn!("Error reading {}: {}", file.relative_path, err);
                    return TransformResult::placeholder(
                        &file.relative_path,
                        doc_placeholder(&file.relative_path, &err),
                    );
                }
            };

            let category = transformer.categorize(file, &content);
            debug!("Category for {}: {}", file.relative_path, category);

            match transformer.short_doc(file, &content, category) {
                Ok(text) => TransformResult::ok(&file.relative_path, text),
                Err(err) => {
                    warn!("Error documenting {}: {}", file.relative_path, err);
                    TransformResult::placeholder(
                        &file.relative_path,
                        doc_placeholder(&file.relative_path, &err),
                    )
                }
            }
        });
        let transform_duration = transform_start.elapsed();
        let failed_transforms = results.iter().filter(|r| !r.succeeded).count();

        info!("Stage 3/3: Combining {} fragments...", results.len());
        let aggregate_start = Instant::now();
        let aggregator = Aggregator::new(
            self.generator,
            &self.config.reduce_model,
            self.config.temperature,
        );
        let combined = aggregator.combine(prompts::COMBINE_DOCS_SYSTEM, &results);
        sink.save_named(&format!("raw_{}", self.config.output_file), &combined);

        let cleaned = aggregator.refine(prompts::CLEAN_UP_DOCS_SYSTEM, &combined);
        let aggregate_duration = aggregate_start.elapsed();

        Writer::new(&self.config.output_dir).write_document(&self.config.output_file, &cleaned)?;

        let stats = self.finish(
            "docs",
            &sink,
            files.len(),
            failed_transforms,
            1,
            scan_duration,
            transform_duration,
            aggregate_duration,
            start_time.elapsed(),
        );
        Ok(stats)
    }

    /// Generates a per-file Mermaid diagram set, a combined system diagram,
    /// and a simplified variant of the combined diagram.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan finds no relevant files or a final write
    /// fails.
    #[instrument(skip(self), fields(root_dir = %self.config.root_dir.display()))]
    pub fn generate_diagrams(&self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        info!("Stage 1/3: Scanning {}", self.config.root_dir.display());
        let scan_start = Instant::now();
        let files = Scanner::new(&self.config.root_dir, &file::DIAGRAM_EXTENSIONS).scan()?;
        let scan_duration = scan_start.elapsed();
        info!(
            "✓ Found {} relevant files in {:.2}s",
            files.len(),
            scan_duration.as_secs_f64()
        );

        let sink = self.debug_sink("diagrams")?;
        let transformer = Transformer::new(
            self.generator,
            &self.config.per_file_model,
            self.config.temperature,
        );

        info!("Stage 2/3: Generating diagrams per file...");
        let transform_start = Instant::now();
        let results = collect_results(&files, &sink, ".mermaid", |file| {
            let outcome = file
                .read_content()
                .and_then(|content| transformer.file_diagram(file, &content));

            match outcome {
                Ok(diagram) => TransformResult::ok(
                    &file.relative_path,
                    diagram_fragment(&file.relative_path, &diagram),
                ),
                Err(err) => {
                    warn!("Error generating diagram for {}: {}", file.relative_path, err);
                    let body = format!(
                        "Error generating diagram for {}: {}",
                        file.relative_path, err
                    );
                    TransformResult::placeholder(
                        &file.relative_path,
                        diagram_fragment(&file.relative_path, &body),
                    )
                }
            }
        });
        let transform_duration = transform_start.elapsed();
        let failed_transforms = results.iter().filter(|r| !r.succeeded).count();

        info!("Stage 3/3: Combining {} diagrams...", results.len());
        let aggregate_start = Instant::now();
        let aggregator = Aggregator::new(
            self.generator,
            &self.config.reduce_model,
            self.config.temperature,
        );
        let combined = aggregator.combine(prompts::COMBINE_DIAGRAMS_SYSTEM, &results);
        let simplified = aggregator.refine(prompts::SIMPLIFY_DIAGRAM_SYSTEM, &combined);
        let aggregate_duration = aggregate_start.elapsed();

        let writer = Writer::new(&self.config.output_dir);
        writer.write_document(&self.config.output_file, &combined)?;
        writer.write_document(&simplified_file_name(&self.config.output_file), &simplified)?;

        let stats = self.finish(
            "diagrams",
            &sink,
            files.len(),
            failed_transforms,
            2,
            scan_duration,
            transform_duration,
            aggregate_duration,
            start_time.elapsed(),
        );
        Ok(stats)
    }

    /// Generates a modernization report, using previously generated project
    /// documentation as context for every per-file analysis.
    ///
    /// # Errors
    ///
    /// Returns an error if no documentation context file is configured or
    /// readable, the scan finds no relevant files, or the final write fails.
    #[instrument(skip(self), fields(root_dir = %self.config.root_dir.display()))]
    pub fn modernization_report(&self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        let doc_path = self.config.doc_path.as_ref().ok_or_else(|| {
            Error::config("Modernization requires a project documentation file")
        })?;
        let project_doc =
            fs::read_to_string(doc_path).map_err(|e| Error::io(doc_path, e))?;
        debug!(
            "Loaded project documentation from {} ({} chars)",
            doc_path.display(),
            project_doc.len()
        );

        info!("Stage 1/3: Scanning {}", self.config.root_dir.display());
        let scan_start = Instant::now();
        let files = Scanner::new(&self.config.root_dir, &file::MODERNIZE_EXTENSIONS).scan()?;
        let scan_duration = scan_start.elapsed();
        info!(
            "✓ Found {} relevant files in {:.2}s",
            files.len(),
            scan_duration.as_secs_f64()
        );

        let sink = self.debug_sink("analyses")?;
        let transformer = Transformer::new(
            self.generator,
            &self.config.per_file_model,
            self.config.temperature,
        );

        info!("Stage 2/3: Analyzing files...");
        let transform_start = Instant::now();
        let results = collect_results(&files, &sink, "_analysis.md", |file| {
            let outcome = file
                .read_content()
                .and_then(|content| transformer.modernization(file, &content, &project_doc));

            match outcome {
                Ok(analysis) => TransformResult::ok(
                    &file.relative_path,
                    analysis_fragment(&file.relative_path, &analysis),
                ),
                Err(err) => {
                    warn!("Error analyzing {}: {}", file.relative_path, err);
                    let body = format!("Error analyzing {}: {}", file.relative_path, err);
                    TransformResult::placeholder(
                        &file.relative_path,
                        analysis_fragment(&file.relative_path, &body),
                    )
                }
            }
        });
        let transform_duration = transform_start.elapsed();
        let failed_transforms = results.iter().filter(|r| !r.succeeded).count();

        info!("Stage 3/3: Generating modernization report...");
        let aggregate_start = Instant::now();
        let aggregator = Aggregator::new(
            self.generator,
            &self.config.reduce_model,
            self.config.temperature,
        );
        let report = aggregator.combine(prompts::MODERNIZATION_REPORT_SYSTEM, &results);
        let aggregate_duration = aggregate_start.elapsed();

        Writer::new(&self.config.output_dir).write_document(&self.config.output_file, &report)?;

        let stats = self.finish(
            "modernize",
            &sink,
            files.len(),
            failed_transforms,
            1,
            scan_duration,
            transform_duration,
            aggregate_duration,
            start_time.elapsed(),
        );
        Ok(stats)
    }

    fn debug_sink(&self, task: &str) -> Result<DebugSink> {
        if self.config.debug {
            DebugSink::new(self.config.debug_dir(task))
        } else {
            Ok(DebugSink::disabled())
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        task: &str,
        sink: &DebugSink,
        total_files: usize,
        failed_transforms: usize,
        files_written: usize,
        scan_duration: Duration,
        transform_duration: Duration,
        aggregate_duration: Duration,
        duration: Duration,
    ) -> PipelineStats {
        let stats = PipelineStats {
            total_files,
            failed_transforms,
            files_written,
            scan_duration,
            transform_duration,
            aggregate_duration,
            duration,
            output_directory: self.config.output_dir.display().to_string(),
        };
        sink.write_summary(task, &stats);

        if failed_transforms > 0 {
            warn!(
                "{} of {} files fell back to an error placeholder",
                failed_transforms, total_files
            );
        }
        info!(
            "✓ Pipeline completed in {:.2}s ({} files written to {})",
            duration.as_secs_f64(),
            files_written,
            stats.output_directory
        );
        stats
    }
}

/// Runs a per-file operation over every scanned file, collecting exactly one
/// result per file in scan order and dumping each to the debug sink.
fn collect_results<F>(
    files: &[SourceFile],
    sink: &DebugSink,
    artifact_suffix: &str,
    mut op: F,
) -> Vec<TransformResult>
where
    F: FnMut(&SourceFile) -> TransformResult,
{
    let progress = progress_bar(files.len());
    let mut results = Vec::with_capacity(files.len());

    for file in files {
        progress.set_message(file.relative_path.clone());
        let result = op(file);
        sink.save(&result.source_path, artifact_suffix, &result.text);
        results.push(result);
        progress.inc(1);
    }

    progress.finish_and_clear();
    debug_assert_eq!(results.len(), files.len());
    results
}

fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("static progress template")
            .progress_chars("#>-"),
    );
    bar
}

fn doc_placeholder(path: &str, err: &Error) -> String {
    format!("// Error documenting {path}: {err}")
}

fn diagram_fragment(path: &str, body: &str) -> String {
    format!("## Diagram for {path}\n\n```mermaid\n{body}\n```")
}

fn analysis_fragment(path: &str, body: &str) -> String {
    format!("## Analysis for {path}\n\n{body}")
}

/// Derives the simplified-diagram filename from the combined-diagram
/// filename: `system-diagram.mermaid` becomes
/// `system-diagram_simplified.mermaid`.
fn simplified_file_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_simplified.{ext}"),
        None => format!("{name}_simplified"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::join_fragments;
    use assert_fs::prelude::*;
    use std::path::Path;

    /// Replies per stage so tests can tell the calls apart.
    struct ScriptedGenerator;

    impl TextGenerator for ScriptedGenerator {
        fn generate(
            &self,
            system_prompt: &str,
            user_prompt: &str,
            _model: &str,
            _temperature: f32,
        ) -> Result<String> {
            Ok(match system_prompt {
                s if s == prompts::CATEGORIZE_SYSTEM => "Utilities".to_string(),
                s if s == prompts::SHORT_DOC_BRIEF_SYSTEM
                    || s == prompts::SHORT_DOC_PUBLIC_SURFACE_SYSTEM =>
                {
                    "FRAGMENT".to_string()
                }
                s if s == prompts::FILE_DIAGRAM_SYSTEM => "graph TD".to_string(),
                s if s == prompts::MODERNIZATION_SYSTEM => {
                    assert!(user_prompt.starts_with("Documentation of the project:"));
                    "ANALYSIS".to_string()
                }
                s if s == prompts::COMBINE_DOCS_SYSTEM => "COMBINED".to_string(),
                s if s == prompts::CLEAN_UP_DOCS_SYSTEM => "CLEANED".to_string(),
                s if s == prompts::COMBINE_DIAGRAMS_SYSTEM => "COMBINED-DIAGRAM".to_string(),
                s if s == prompts::SIMPLIFY_DIAGRAM_SYSTEM => "SIMPLE-DIAGRAM".to_string(),
                s if s == prompts::MODERNIZATION_REPORT_SYSTEM => "REPORT".to_string(),
                _ => "generated".to_string(),
            })
        }
    }

    /// Per-file calls succeed; every reduction call fails.
    struct FailingReducer;

    impl TextGenerator for FailingReducer {
        fn generate(
            &self,
            system_prompt: &str,
            _user_prompt: &str,
            _model: &str,
            _temperature: f32,
        ) -> Result<String> {
            match system_prompt {
                s if s == prompts::CATEGORIZE_SYSTEM => Ok("Other".to_string()),
                s if s == prompts::SHORT_DOC_BRIEF_SYSTEM => Ok("FRAGMENT".to_string()),
                _ => Err(Error::service("service unavailable")),
            }
        }
    }

    fn docs_config(root: &Path, output: &Path) -> Config {
        Config::builder()
            .root_dir(root)
            .output_dir(output)
            .output_file("project.md")
            .build()
            .unwrap()
    }

    #[test]
    fn test_docs_pipeline_writes_document() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/Main.java").write_str("class Main {}").unwrap();
        temp.child("README.md").write_str("# readme").unwrap();
        let output = temp.path().join("docs");

        let generator = ScriptedGenerator;
        let config = docs_config(temp.path(), &output);
        let stats = Pipeline::new(config, &generator).unwrap().generate_docs().unwrap();

        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.failed_transforms, 0);
        assert_eq!(stats.files_written, 1);
        assert_eq!(
            fs::read_to_string(output.join("project.md")).unwrap(),
            "CLEANED"
        );
    }

    #[test]
    fn test_docs_pipeline_empty_directory_writes_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let output = temp.path().join("docs");

        let generator = ScriptedGenerator;
        let config = docs_config(temp.path(), &output);
        let result = Pipeline::new(config, &generator).unwrap().generate_docs();

        assert!(matches!(result, Err(Error::NoFiles { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_docs_pipeline_keeps_placeholder_for_unreadable_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.java").write_str("class A {}").unwrap();
        temp.child("bad.java")
            .write_binary(&[0xFF, 0xFE, 0x00, 0x81])
            .unwrap();
        let output = temp.path().join("docs");

        let generator = FailingReducer;
        let config = docs_config(temp.path(), &output);
        let stats = Pipeline::new(config, &generator).unwrap().generate_docs().unwrap();

        // One placeholder, but still one result per scanned file.
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.failed_transforms, 1);

        let written = fs::read_to_string(output.join("project.md")).unwrap();
        assert!(written.contains("// Error documenting bad.java"));
    }

    #[test]
    fn test_docs_pipeline_falls_back_to_raw_join_when_combine_fails() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.java").write_str("class A {}").unwrap();
        temp.child("b.java").write_str("class B {}").unwrap();
        let output = temp.path().join("docs");

        let generator = FailingReducer;
        let config = docs_config(temp.path(), &output);
        Pipeline::new(config, &generator).unwrap().generate_docs().unwrap();

        let expected = join_fragments(&[
            TransformResult::ok("a.java", "FRAGMENT"),
            TransformResult::ok("b.java", "FRAGMENT"),
        ]);
        assert_eq!(
            fs::read_to_string(output.join("project.md")).unwrap(),
            expected
        );
    }

    #[test]
    fn test_docs_pipeline_dumps_debug_artifacts() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("Main.java").write_str("class Main {}").unwrap();
        let output = temp.path().join("docs");

        let generator = ScriptedGenerator;
        let config = Config::builder()
            .root_dir(temp.path())
            .output_dir(&output)
            .output_file("project.md")
            .debug(true)
            .build()
            .unwrap();
        Pipeline::new(config, &generator).unwrap().generate_docs().unwrap();

        let debug_dir = output.join("debug").join("short_docs");
        assert!(debug_dir.join("summary.json").exists());
        assert!(debug_dir.join("raw_project.md").exists());

        let artifact = debug_dir.join(crate::artifacts::stable_artifact_name(
            "Main.java",
            "_short.md",
        ));
        assert_eq!(fs::read_to_string(artifact).unwrap(), "FRAGMENT");
    }

    #[test]
    fn test_diagrams_pipeline_writes_combined_and_simplified() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("Main.java").write_str("class Main {}").unwrap();
        temp.child("page.xhtml").write_str("<html/>").unwrap();
        let output = temp.path().join("docs");

        let generator = ScriptedGenerator;
        let config = Config::builder()
            .root_dir(temp.path())
            .output_dir(&output)
            .output_file("system-diagram.mermaid")
            .build()
            .unwrap();
        let stats = Pipeline::new(config, &generator)
            .unwrap()
            .generate_diagrams()
            .unwrap();

        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.files_written, 2);
        assert_eq!(
            fs::read_to_string(output.join("system-diagram.mermaid")).unwrap(),
            "COMBINED-DIAGRAM"
        );
        assert_eq!(
            fs::read_to_string(output.join("system-diagram_simplified.mermaid")).unwrap(),
            "SIMPLE-DIAGRAM"
        );
    }

    #[test]
    fn test_diagram_fragments_are_fenced() {
        let fragment = diagram_fragment("src/Main.java", "graph TD");
        assert!(fragment.starts_with("## Diagram for src/Main.java"));
        assert!(fragment.contains("```mermaid\ngraph TD\n```"));
    }

    #[test]
    fn test_modernize_pipeline_requires_doc_context() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("Main.java").write_str("class Main {}").unwrap();

        let generator = ScriptedGenerator;
        let config = docs_config(temp.path(), &temp.path().join("docs"));
        let result = Pipeline::new(config, &generator)
            .unwrap()
            .modernization_report();

        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_modernize_pipeline_writes_report() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("Main.java").write_str("class Main {}").unwrap();
        temp.child("project.md").write_str("= Project docs").unwrap();
        let output = temp.path().join("docs");

        let generator = ScriptedGenerator;
        let config = Config::builder()
            .root_dir(temp.path())
            .output_dir(&output)
            .output_file("modernization-report.md")
            .doc_path(temp.path().join("project.md"))
            .build()
            .unwrap();
        let stats = Pipeline::new(config, &generator)
            .unwrap()
            .modernization_report()
            .unwrap();

        assert_eq!(stats.files_written, 1);
        assert_eq!(
            fs::read_to_string(output.join("modernization-report.md")).unwrap(),
            "REPORT"
        );
    }

    #[test]
    fn test_simplified_file_name() {
        assert_eq!(
            simplified_file_name("system-diagram.mermaid"),
            "system-diagram_simplified.mermaid"
        );
        assert_eq!(simplified_file_name("diagram"), "diagram_simplified");
    }
}
