//! Datascout Document Sources
//!
//! Implementations of the `DocumentSource` trait from `datascout-domain`:
//! discover papers in a folder and extract their text.
//!
//! - [`PdfFolderSource`]: `*.pdf` files, text via `pdf-extract`
//! - [`TextFolderSource`]: `*.txt` / `*.md` files read as UTF-8
//!
//! Documents are listed in file-name order so repeated runs send papers to
//! the backend in the same order.

#![warn(missing_docs)]

mod folder;
mod pdf;
mod text;

pub use pdf::PdfFolderSource;
pub use text::TextFolderSource;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by document sources
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The source location could not be listed
    #[error("Cannot read document folder {path}: {source}")]
    SourceUnavailable {
        /// Folder that was listed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// One document's text could not be extracted
    #[error("Failed to read document {path}: {reason}")]
    Read {
        /// Document that failed
        path: PathBuf,
        /// Why extraction failed
        reason: String,
    },
}
