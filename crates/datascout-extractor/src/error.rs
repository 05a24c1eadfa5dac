//! Error types for the Extractor

use datascout_domain::{ExtractionTask, InvalidTaskError};
use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Backend call failed
    #[error("Backend request failed: {0}")]
    Backend(String),

    /// Backend answer is not parseable JSON
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// Backend answer does not follow the task's response contract
    #[error("Response for '{task}' violates its contract: {reason}")]
    ContractViolation {
        /// Task whose contract was violated
        task: ExtractionTask,
        /// What was wrong
        reason: String,
    },

    /// Backend call exceeded the configured timeout
    #[error("Backend request timed out after {0}s")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown task name
    #[error(transparent)]
    InvalidTask(#[from] InvalidTaskError),

    /// No paper could be read
    #[error("No documents could be read from {0}")]
    NoDocuments(String),

    /// Registry could not be saved
    #[error("Failed to persist registry: {0}")]
    Persistence(String),
}
