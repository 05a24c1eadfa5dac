//! PDF folder source

use crate::folder::list_with_extensions;
use crate::DocumentError;
use datascout_domain::traits::DocumentSource;
use datascout_domain::DocumentHandle;
use std::path::Path;
use tracing::debug;

/// Papers stored as PDF files in a folder
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfFolderSource;

impl PdfFolderSource {
    /// Create a new PDF source
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSource for PdfFolderSource {
    type Error = DocumentError;

    fn list_documents(&self, location: &Path) -> Result<Vec<DocumentHandle>, Self::Error> {
        list_with_extensions(location, &["pdf"])
    }

    fn extract_text(&self, handle: &DocumentHandle) -> Result<String, Self::Error> {
        // pdf_extract can panic on malformed PDFs
        let path = handle.path.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text(&path)
        }));

        match result {
            Ok(Ok(text)) => {
                debug!("Extracted {} chars from {}", text.len(), handle.name);
                Ok(text)
            }
            Ok(Err(e)) => Err(DocumentError::Read {
                path: handle.path.clone(),
                reason: e.to_string(),
            }),
            Err(_) => Err(DocumentError::Read {
                path: handle.path.clone(),
                reason: "PDF extraction panicked (malformed PDF)".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lists_only_pdfs_sorted() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.pdf"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("a.PDF"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"text").unwrap();
        std::fs::create_dir(dir.path().join("sub.pdf")).unwrap();

        let handles = PdfFolderSource::new().list_documents(dir.path()).unwrap();
        let names: Vec<_> = handles.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_missing_folder() {
        let dir = TempDir::new().unwrap();
        let result = PdfFolderSource::new().list_documents(&dir.path().join("absent"));
        assert!(matches!(result, Err(DocumentError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_corrupt_pdf_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let result = PdfFolderSource::new().extract_text(&DocumentHandle::from_path(path));
        assert!(matches!(result, Err(DocumentError::Read { .. })));
    }
}
