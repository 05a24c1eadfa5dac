//! Datascout Extractor
//!
//! Runs the fixed set of extraction tasks over a batch of papers and merges
//! every dataset mention into the dataset registry.
//!
//! # Overview
//!
//! Each task is one request to an [`ExtractionBackend`]: task instructions,
//! a strict response contract, and the full text of every paper in the batch.
//! The answer must be a single JSON object keyed by the task name holding a
//! list of `{dataset_name, value}` records. For the `dataset_name` task each
//! record is resolved against the registry and stamped with its unique id.
//!
//! # Architecture
//!
//! ```text
//! Papers → Orchestrator → Backend → Records → Registry (dataset_name only)
//! ```
//!
//! # Key Features
//!
//! - **Task isolation**: a failed task is reported and the run continues
//! - **Registry hints**: known datasets are shown to the model for consistent naming
//! - **Strict parsing**: answers that break the contract fail their task
//!
//! # Example Usage
//!
//! ```no_run
//! use datascout_extractor::{ExtractorConfig, Orchestrator, Paper};
//! use datascout_llm::MockBackend;
//! use datascout_registry::DatasetRegistry;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = Orchestrator::new(MockBackend::default(), ExtractorConfig::default())?;
//! let mut registry = DatasetRegistry::seeded();
//! let papers = vec![Paper::new("paper.pdf", "We evaluate on NSL-KDD.")];
//!
//! let report = orchestrator.run(&papers, &mut registry).await;
//!
//! println!("Failed tasks: {}", report.failures().len());
//! println!("New datasets: {:?}", report.new_dataset_ids());
//! # Ok(())
//! # }
//! ```
//!
//! [`ExtractionBackend`]: datascout_domain::traits::ExtractionBackend

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod prompt;
mod parser;
mod papers;
mod orchestrator;

#[cfg(test)]
mod tests;

pub use error::ExtractorError;
pub use config::ExtractorConfig;
pub use types::{
    ExtractionReport, Paper, ReconciledDataset, ResultsDocument, TaskFailure, TaskOutcome,
};
pub use prompt::PromptBuilder;
pub use parser::{decode_candidate, parse_task_response};
pub use papers::load_papers;
pub use orchestrator::Orchestrator;
