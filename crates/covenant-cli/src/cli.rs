//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use covenant_extractor::{ExtractorSetKind, PipelineConfig, ProviderKind};
use std::path::PathBuf;

/// Covenant - build a policy catalog from a tree of insurer brochures.
#[derive(Debug, Parser)]
#[command(name = "covenant")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "COVENANT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process every document under the input root and write the manifests
    Run(RunArgs),

    /// Run the per-document pipeline on one file and print its record
    Extract(ExtractArgs),

    /// Print the category table
    Categories,
}

/// Pipeline overrides shared by `run` and `extract`.
#[derive(Debug, Clone, Default, Args)]
pub struct PipelineArgs {
    /// Run the extended extractor set
    #[arg(long)]
    pub extended: bool,

    /// Narrative provider (none, ollama or gemini)
    #[arg(long)]
    pub provider: Option<ProviderKind>,

    /// Model name for the narrative provider
    #[arg(long)]
    pub model: Option<String>,
}

impl PipelineArgs {
    /// Apply the flags on top of a loaded pipeline configuration
    pub fn apply(&self, config: &mut PipelineConfig) {
        if self.extended {
            config.extractor_set = ExtractorSetKind::Extended;
        }
        if let Some(provider) = self.provider {
            config.enrichment.provider = provider;
        }
        if let Some(model) = &self.model {
            config.enrichment.model = model.clone();
        }
    }
}

/// Arguments for the run command.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Input root holding one subdirectory per category
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Directory receiving the manifests
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Concurrent workers
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Completions between snapshots (0 disables them)
    #[arg(long)]
    pub checkpoint_interval: Option<usize>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Arguments for the extract command.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Document to process
    pub file: PathBuf,

    /// Category directory name (defaults to the file's parent directory)
    #[arg(long)]
    pub category: Option<String>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}
