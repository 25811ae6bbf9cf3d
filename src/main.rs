use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use codescribe::{ChatClient, Config, Pipeline};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "codescribe",
    version,
    about = "Generate documentation, diagrams, and modernization reports for a codebase with an LLM",
    long_about = "Generate documentation, system diagrams, and modernization reports for a codebase.\n\n\
    Each subcommand scans a directory for relevant files, sends every file to a \
    text-generation service, and combines the per-file results into one or two \
    output documents. Requires OPENAI_API_KEY in the environment or a .env file.\n\n\
    USAGE EXAMPLES:\n  \
      # Document a project\n  \
      codescribe docs ./my-project -o ./docs\n\n  \
      # Generate a system diagram with intermediate dumps\n  \
      codescribe diagrams ./my-project --debug\n\n  \
      # Suggest modernization steps using the generated documentation\n  \
      codescribe modernize ./docs/project.md ./my-project"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate combined project documentation from source files
    Docs(DocsArgs),
    /// Generate per-file Mermaid diagrams and a combined system diagram
    Diagrams(DiagramsArgs),
    /// Suggest modernization opportunities using existing project documentation
    Modernize(ModernizeArgs),
}

#[derive(Args, Debug)]
struct DocsArgs {
    /// Root directory of the codebase to document (must exist)
    #[arg(value_name = "DIR")]
    directory: PathBuf,

    /// Output directory for generated documents
    #[arg(short, long, default_value = "docs", value_name = "PATH")]
    output: PathBuf,

    /// Name of the combined documentation file
    #[arg(long, default_value = "project.md", value_name = "FILE")]
    doc_file: String,

    /// Model for per-file requests
    #[arg(long, default_value = "gpt-4.1-nano", value_name = "MODEL")]
    model: String,

    /// Model for combine and clean-up requests
    #[arg(long, default_value = "gpt-4o-mini", value_name = "MODEL")]
    reduce_model: String,

    /// Dump per-file artifacts and a run summary under <OUTPUT>/debug
    #[arg(short, long)]
    debug: bool,
}

#[derive(Args, Debug)]
struct DiagramsArgs {
    /// Root directory of the codebase to diagram (must exist)
    #[arg(value_name = "DIR")]
    directory: PathBuf,

    /// Output directory for generated diagrams
    #[arg(short, long, default_value = "docs", value_name = "PATH")]
    output: PathBuf,

    /// Name of the combined diagram file
    #[arg(long, default_value = "system-diagram.mermaid", value_name = "FILE")]
    diagram_file: String,

    /// Model for per-file requests
    #[arg(long, default_value = "gpt-4.1-nano", value_name = "MODEL")]
    model: String,

    /// Model for combine and simplify requests
    #[arg(long, default_value = "gpt-4.1-mini", value_name = "MODEL")]
    reduce_model: String,

    /// Dump per-file artifacts and a run summary under <OUTPUT>/debug
    #[arg(short, long)]
    debug: bool,
}

#[derive(Args, Debug)]
struct ModernizeArgs {
    /// Previously generated project documentation used as analysis context
    #[arg(value_name = "DOC_FILE")]
    doc_file: PathBuf,

    /// Root directory of the codebase to analyze (must exist)
    #[arg(value_name = "DIR")]
    directory: PathBuf,

    /// Output directory for the report
    #[arg(short, long, default_value = "docs", value_name = "PATH")]
    output: PathBuf,

    /// Name of the modernization report file
    #[arg(long, default_value = "modernization-report.md", value_name = "FILE")]
    report_file: String,

    /// Model for per-file requests
    #[arg(long, default_value = "gpt-4.1-mini", value_name = "MODEL")]
    model: String,

    /// Model for the report request
    #[arg(long, default_value = "gpt-4.1-mini", value_name = "MODEL")]
    reduce_model: String,

    /// Dump per-file artifacts and a run summary under <OUTPUT>/debug
    #[arg(short, long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    // Credentials may come from a .env file or the environment; a missing
    // .env is not an error.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    setup_tracing(cli.verbose, debug_enabled(&cli.command))?;

    let client = ChatClient::from_env().context("Generation service is not configured")?;

    match cli.command {
        Commands::Docs(args) => {
            let config = Config::builder()
                .root_dir(args.directory)
                .output_dir(args.output)
                .output_file(args.doc_file)
                .per_file_model(args.model)
                .reduce_model(args.reduce_model)
                .debug(args.debug)
                .build()
                .context("Failed to build configuration")?;

            Pipeline::new(config, &client)?
                .generate_docs()
                .context("Documentation generation failed")?;
        }
        Commands::Diagrams(args) => {
            let config = Config::builder()
                .root_dir(args.directory)
                .output_dir(args.output)
                .output_file(args.diagram_file)
                .per_file_model(args.model)
                .reduce_model(args.reduce_model)
                .debug(args.debug)
                .build()
                .context("Failed to build configuration")?;

            Pipeline::new(config, &client)?
                .generate_diagrams()
                .context("Diagram generation failed")?;
        }
        Commands::Modernize(args) => {
            let config = Config::builder()
                .root_dir(args.directory)
                .output_dir(args.output)
                .output_file(args.report_file)
                .doc_path(args.doc_file)
                .per_file_model(args.model)
                .reduce_model(args.reduce_model)
                .debug(args.debug)
                .build()
                .context("Failed to build configuration")?;

            Pipeline::new(config, &client)?
                .modernization_report()
                .context("Modernization analysis failed")?;
        }
    }

    Ok(())
}

fn debug_enabled(command: &Commands) -> bool {
    match command {
        Commands::Docs(args) => args.debug,
        Commands::Diagrams(args) => args.debug,
        Commands::Modernize(args) => args.debug,
    }
}

fn setup_tracing(verbosity: u8, debug: bool) -> anyhow::Result<()> {
    // --debug implies at least debug-level tracing in addition to the dumps.
    let effective = if debug { verbosity.max(1) } else { verbosity };
    let filter = match effective {
        0 => EnvFilter::new("codescribe=info"),
        1 => EnvFilter::new("codescribe=debug"),
        _ => EnvFilter::new("codescribe=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();

    Ok(())
}
