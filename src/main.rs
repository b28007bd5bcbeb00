//! Entry point for the accessor generator.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::Parser;
use echoes::codegen::{
    self,
    CodegenError,
    GenerationOutcome,
    GeneratorOptions,
};
use echoes::config::{
    ConfigError,
    ConfigManager,
};
use echoes::indexer::{
    IndexerError,
    find_documents,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Generate typed accessors for TOML translation documents.
#[derive(Debug, Parser)]
#[command(name = "echoes-gen", version, about)]
struct Cli {
    /// Project root holding `.echoes.json` and the documents
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Output directory, overriding `outputDir`
    #[arg(long)]
    out: Option<PathBuf>,

    /// Report what would be generated without writing files
    #[arg(long)]
    check: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Indexer(#[from] IndexerError),
}

/// Per-run counts.
#[derive(Debug, Default, Clone, Copy)]
struct Summary {
    generated: usize,
    skipped: usize,
    failed: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) => {
            tracing::info!(
                generated = summary.generated,
                skipped = summary.skipped,
                failed = summary.failed,
                "Generation finished"
            );
            if summary.failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Summary, CliError> {
    let mut config = ConfigManager::load(&cli.root)?;
    if let Some(out) = &cli.out {
        config.override_output_dir(out)?;
    }

    let documents = find_documents(config.project_root(), config.settings())?;
    let project_dir = config.document_base();
    let out_dir = config.output_dir();
    let options = GeneratorOptions::from(config.settings());

    let mut summary = Summary::default();
    // Output file name to the document it was generated from.
    let mut outputs: HashMap<String, String> = HashMap::new();
    for result in codegen::generate_batch(&documents, &project_dir, &options) {
        match result.outcome {
            GenerationOutcome::Generated(file) => {
                if let Some(previous) = outputs.get(&file.file_name) {
                    summary.failed += 1;
                    tracing::error!(
                        "{} and {} both generate {}; rename one of the documents",
                        previous,
                        file.relative_path,
                        file.file_name
                    );
                    continue;
                }
                outputs.insert(file.file_name.clone(), file.relative_path.clone());
                summary.generated += 1;
                if cli.check {
                    tracing::info!(document = %file.relative_path, output = %out_dir.join(&file.file_name).display(), "Would generate");
                } else if let Err(e) = write(&file, &out_dir) {
                    summary.failed += 1;
                    tracing::error!("{e}");
                }
            }
            GenerationOutcome::Skipped => {
                summary.skipped += 1;
                tracing::debug!("Skipped {:?}: no generator configuration", result.path);
            }
            GenerationOutcome::Failed(e) => {
                summary.failed += 1;
                tracing::error!("Failed to generate {:?}: {}", result.path, e);
            }
        }
    }
    Ok(summary)
}

fn write(file: &codegen::GeneratedFile, out_dir: &Path) -> Result<(), CodegenError> {
    let path = codegen::write_generated(file, out_dir)?;
    tracing::info!(document = %file.relative_path, output = %path.display(), "Generated accessors");
    Ok(())
}
