//! Loading paper text from a document source

use crate::error::ExtractorError;
use crate::types::Paper;
use datascout_domain::traits::DocumentSource;
use std::fmt::Display;
use std::path::Path;
use tracing::{info, warn};

/// Read every document at `location`, skipping the ones that fail
///
/// `max_text_length` truncates each paper to that many characters (0 keeps
/// the full text). Fails only when the location cannot be listed or no
/// document could be read at all.
pub fn load_papers<D>(
    source: &D,
    location: &Path,
    max_text_length: usize,
) -> Result<Vec<Paper>, ExtractorError>
where
    D: DocumentSource,
    D::Error: Display,
{
    let handles = source.list_documents(location).map_err(|e| {
        warn!("Cannot list documents: {}", e);
        ExtractorError::NoDocuments(location.display().to_string())
    })?;

    let mut papers = Vec::with_capacity(handles.len());
    for handle in &handles {
        match source.extract_text(handle) {
            Ok(text) => {
                info!("Extracted text from: {}", handle.name);
                papers.push(Paper::new(handle.name.clone(), truncate_chars(text, max_text_length)));
            }
            Err(e) => {
                warn!("Skipping {}: {}", handle.name, e);
            }
        }
    }

    if papers.is_empty() {
        return Err(ExtractorError::NoDocuments(location.display().to_string()));
    }

    info!("Loaded {} of {} documents", papers.len(), handles.len());
    Ok(papers)
}

fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if max_chars == 0 {
        return text;
    }
    if let Some((byte_idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_idx);
    }
    text
}
