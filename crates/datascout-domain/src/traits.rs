//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{DatasetEntry, ResponseContract};
use std::future::Future;
use std::path::{Path, PathBuf};

/// A discovered document that text can be extracted from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    /// Display name (file name)
    pub name: String,

    /// Location of the document
    pub path: PathBuf,
}

impl DocumentHandle {
    /// Create a handle for a path, using the file name as display name
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

/// Trait for supplying paper text
///
/// Implemented by the infrastructure layer (datascout-documents)
pub trait DocumentSource {
    /// Error type for source operations
    type Error;

    /// List the documents available at a location
    fn list_documents(&self, location: &Path) -> Result<Vec<DocumentHandle>, Self::Error>;

    /// Extract the full text of one document
    fn extract_text(&self, handle: &DocumentHandle) -> Result<String, Self::Error>;
}

/// Trait for the structured-extraction backend
///
/// Implemented by the infrastructure layer (datascout-llm)
pub trait ExtractionBackend {
    /// Error type for backend operations
    type Error;

    /// Run one completion and return the raw JSON text of the answer
    ///
    /// `contract` describes the JSON object the answer must conform to.
    fn complete(
        &self,
        system_instructions: &str,
        user_content: &str,
        contract: &ResponseContract,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Model name, for run metadata
    fn model_name(&self) -> &str;
}

/// Trait for persisting the registry
///
/// Implemented by the infrastructure layer (datascout-registry)
pub trait RegistrySink {
    /// Error type for persistence operations
    type Error;

    /// Overwrite the persisted registry with the full entry collection
    fn save(&self, entries: &[DatasetEntry]) -> Result<(), Self::Error>;
}
