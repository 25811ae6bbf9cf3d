//! # codescribe
//!
//! Generate documentation, system diagrams, and modernization reports for a
//! codebase by delegating the analysis to a text-generation service.
//!
//! ## Tasks
//!
//! - **Docs**: categorize each file, generate a short documentation fragment
//!   per file, combine everything into one document, then clean it up.
//! - **Diagrams**: generate a Mermaid diagram per file, combine them into a
//!   system diagram, and write a simplified variant alongside it.
//! - **Modernize**: analyze each file for modernization opportunities using
//!   previously generated project documentation as context, then combine the
//!   analyses into a report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use codescribe::{ChatClient, Config, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let client = ChatClient::from_env()?;
//! let config = Config::builder()
//!     .root_dir("./my-project")
//!     .output_dir("./docs")
//!     .output_file("project.md")
//!     .build()?;
//!
//! let stats = Pipeline::new(config, &client)?.generate_docs()?;
//! println!("Processed {} files", stats.total_files);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Every task is the same strictly sequential pipeline:
//! 1. **Scanner**: discovers files matching a task-specific extension
//!    allow-list
//! 2. **Transformer**: one generation call per file, placeholder on error
//! 3. **Aggregator**: one or two reduction calls over all fragments
//! 4. **Writer**: persists the final document(s)

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod aggregate;
mod artifacts;
mod category;
mod client;
mod config;
mod error;
mod file;
mod pipeline;
mod prompts;
mod scanner;
mod transform;
mod writer;

pub use category::Category;
pub use client::{API_KEY_VAR, BASE_URL_VAR, ChatClient, TextGenerator};
pub use config::{Config, ConfigBuilder, DEFAULT_TEMPERATURE};
pub use error::{Error, Result};
pub use file::SourceFile;
pub use pipeline::{Pipeline, PipelineStats};
pub use transform::TransformResult;

/// Generates combined project documentation for the configured root.
///
/// This is the entry point behind the `docs` subcommand.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the scan finds no
/// relevant files, or the final write fails.
pub fn generate_docs(config: Config, generator: &dyn TextGenerator) -> Result<PipelineStats> {
    Pipeline::new(config, generator)?.generate_docs()
}

/// Generates a combined system diagram plus a simplified variant.
///
/// This is the entry point behind the `diagrams` subcommand.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the scan finds no
/// relevant files, or a final write fails.
pub fn generate_diagrams(config: Config, generator: &dyn TextGenerator) -> Result<PipelineStats> {
    Pipeline::new(config, generator)?.generate_diagrams()
}

/// Generates a modernization report using existing project documentation as
/// context.
///
/// This is the entry point behind the `modernize` subcommand.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the documentation
/// context is missing, the scan finds no relevant files, or the final write
/// fails.
pub fn modernization_report(
    config: Config,
    generator: &dyn TextGenerator,
) -> Result<PipelineStats> {
    Pipeline::new(config, generator)?.modernization_report()
}
