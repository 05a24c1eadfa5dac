//! Datascout Domain Layer
//!
//! Core value types and trait boundaries for extracting dataset metadata from
//! research papers and reconciling it against a registry of known datasets.
//!
//! ## Key Concepts
//!
//! - **DatasetEntry**: a canonical registry record with a stable numeric id
//! - **DatasetCandidate**: a dataset mention extracted from paper text, not yet reconciled
//! - **ExtractionTask**: one fixed category of information pulled from the papers
//! - **TaskRecord**: a single `{dataset_name, value}` answer produced for a task
//!
//! ## Architecture
//!
//! This crate holds no I/O. Document discovery, the extraction backend and
//! registry persistence are expressed as traits in [`traits`] and implemented
//! by the infrastructure crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod dataset;
pub mod record;
pub mod run;
pub mod task;
pub mod traits;

// Re-exports for convenience
pub use contract::ResponseContract;
pub use dataset::{DatasetCandidate, DatasetEntry, DatasetId};
pub use record::TaskRecord;
pub use run::RunId;
pub use task::{ExtractionTask, InvalidTaskError};
pub use traits::DocumentHandle;
