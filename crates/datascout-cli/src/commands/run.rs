//! Run command implementation.

use crate::backend::Backend;
use crate::cli::RunArgs;
use crate::config::{BackendConfig, Config, DocumentKind, Provider};
use crate::error::Result;
use crate::output::Formatter;
use datascout_documents::{PdfFolderSource, TextFolderSource};
use datascout_domain::traits::ExtractionBackend;
use datascout_extractor::{load_papers, ExtractionReport, ExtractorConfig, Orchestrator, Paper};
use datascout_registry::JsonRegistryFile;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything a run needs, with command-line flags applied over the config file.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Folder holding the papers
    pub papers: PathBuf,
    /// Kind of documents in the folder
    pub source: DocumentKind,
    /// Registry file
    pub registry: PathBuf,
    /// Results file
    pub results: PathBuf,
    /// Backend settings
    pub backend: BackendConfig,
    /// Extraction settings
    pub extraction: ExtractorConfig,
    /// Skip writing any file
    pub dry_run: bool,
}

impl RunPlan {
    /// Merge flags over configuration.
    pub fn resolve(args: RunArgs, config: &Config) -> Self {
        let mut backend = config.backend.clone();
        if let Some(provider) = args.provider {
            backend.provider = provider.into();
        }
        if let Some(model) = args.model {
            backend.model = model;
        }
        if args.dry_run {
            backend.provider = Provider::Mock;
        }

        let mut extraction = config.extraction.clone();
        if !args.tasks.is_empty() {
            extraction.tasks = args.tasks;
        }

        Self {
            papers: args.papers.unwrap_or_else(|| config.paths.papers.clone()),
            source: args.source.map(Into::into).unwrap_or(config.paths.source),
            registry: args.registry.unwrap_or_else(|| config.paths.registry.clone()),
            results: args.results.unwrap_or_else(|| config.paths.results.clone()),
            backend,
            extraction,
            dry_run: args.dry_run,
        }
    }
}

/// Execute the run command.
pub async fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let plan = RunPlan::resolve(args, config);
    let backend = Backend::from_config(&plan.backend)?;

    let report = run_plan(&plan, backend).await?;

    println!("{}", formatter.format_report(&report)?);
    if plan.dry_run {
        println!("{}", formatter.info("Dry run: registry and results were not written"));
    } else {
        println!("{}", formatter.info(&format!("Results written to {}", plan.results.display())));
    }

    Ok(())
}

/// Load papers, run every task, then persist the registry and results.
pub async fn run_plan<B>(plan: &RunPlan, backend: B) -> Result<ExtractionReport>
where
    B: ExtractionBackend,
    B::Error: Display,
{
    let papers = read_papers(&plan.papers, plan.source, plan.extraction.max_text_length)?;
    let orchestrator = Orchestrator::new(backend, plan.extraction.clone())?;

    let registry_file = JsonRegistryFile::new(&plan.registry);
    let mut registry = registry_file.load_or_seed()?;

    if plan.dry_run {
        return Ok(orchestrator.run(&papers, &mut registry).await);
    }

    let report = orchestrator.run_and_save(&papers, &mut registry, &registry_file).await?;
    write_results(&plan.results, &report)?;
    Ok(report)
}

fn read_papers(folder: &Path, source: DocumentKind, max_text_length: usize) -> Result<Vec<Paper>> {
    let papers = match source {
        DocumentKind::Pdf => load_papers(&PdfFolderSource::new(), folder, max_text_length)?,
        DocumentKind::Text => load_papers(&TextFolderSource::new(), folder, max_text_length)?,
    };
    Ok(papers)
}

fn write_results(path: &Path, report: &ExtractionReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let contents = serde_json::to_string_pretty(&report.to_document())?;
    fs::write(path, contents)?;
    info!("Wrote results for run {} to {}", report.run_id, path.display());
    Ok(())
}
