//! Plain-text folder source

use crate::folder::list_with_extensions;
use crate::DocumentError;
use datascout_domain::traits::DocumentSource;
use datascout_domain::DocumentHandle;
use std::path::Path;

/// Papers already converted to text (`.txt` or `.md`)
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFolderSource;

impl TextFolderSource {
    /// Create a new text source
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSource for TextFolderSource {
    type Error = DocumentError;

    fn list_documents(&self, location: &Path) -> Result<Vec<DocumentHandle>, Self::Error> {
        list_with_extensions(location, &["txt", "md"])
    }

    fn extract_text(&self, handle: &DocumentHandle) -> Result<String, Self::Error> {
        std::fs::read_to_string(&handle.path).map_err(|e| DocumentError::Read {
            path: handle.path.clone(),
            reason: e.to_string(),
        })
    }
}
