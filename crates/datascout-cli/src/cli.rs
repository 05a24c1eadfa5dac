//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use datascout_domain::ExtractionTask;
use std::path::PathBuf;

/// Datascout - Extract dataset metadata from cybersecurity papers.
#[derive(Debug, Parser)]
#[command(name = "datascout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DATASCOUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

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
    /// Quiet format (ids only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the extraction tasks over a folder of papers
    Run(RunArgs),

    /// Inspect the dataset registry
    Registry(RegistryArgs),

    /// List the extraction tasks
    Tasks(TasksArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Folder holding the papers
    #[arg(short, long)]
    pub papers: Option<PathBuf>,

    /// Kind of documents in the papers folder
    #[arg(short, long, value_enum)]
    pub source: Option<SourceArg>,

    /// Dataset registry file
    #[arg(short, long)]
    pub registry: Option<PathBuf>,

    /// Where to write the per-task results
    #[arg(long)]
    pub results: Option<PathBuf>,

    /// Task to run (repeatable, default all)
    #[arg(short, long = "task", value_name = "TASK")]
    pub tasks: Vec<ExtractionTask>,

    /// Backend provider
    #[arg(long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Model name
    #[arg(short, long)]
    pub model: Option<String>,

    /// Use the mock backend and leave the registry file untouched
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the registry command.
#[derive(Debug, Parser)]
pub struct RegistryArgs {
    /// Dataset registry file
    #[arg(short, long)]
    pub registry: Option<PathBuf>,

    #[command(subcommand)]
    pub action: RegistryAction,
}

/// Registry actions.
#[derive(Debug, Subcommand)]
pub enum RegistryAction {
    /// List all registry entries
    List,

    /// Look up the entry a dataset reference resolves to
    Match {
        /// Dataset name
        #[arg(short, long)]
        name: String,
        /// Authors
        #[arg(short, long, default_value = "")]
        authors: String,
        /// DOI or link
        #[arg(short, long, default_value = "")]
        doi: String,
    },
}

/// Arguments for the tasks command.
#[derive(Debug, Parser)]
pub struct TasksArgs {
    /// Print each task's instructions
    #[arg(long)]
    pub show_prompt: bool,
}

/// Provider argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProviderArg {
    /// OpenAI chat completions
    Openai,
    /// Local Ollama server
    Ollama,
    /// Mock backend
    Mock,
}

/// Document source argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SourceArg {
    /// PDF files
    Pdf,
    /// Plain text and Markdown files
    Text,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ProviderArg> for crate::config::Provider {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Openai => crate::config::Provider::OpenAi,
            ProviderArg::Ollama => crate::config::Provider::Ollama,
            ProviderArg::Mock => crate::config::Provider::Mock,
        }
    }
}

impl From<SourceArg> for crate::config::DocumentKind {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Pdf => crate::config::DocumentKind::Pdf,
            SourceArg::Text => crate::config::DocumentKind::Text,
        }
    }
}
