//! PDF Text Extraction
//!
//! Converts uploaded PDF bytes into plain text using MuPDF. Extraction is
//! all-or-nothing: the first failing page aborts the whole document.

mod pdf;

pub use pdf::{extract_text, extract_text_blocking, has_pdf_header};

use thiserror::Error;

/// Text extraction error type
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No `%PDF` header near the start of the data
    #[error("File does not look like a PDF (missing %PDF header)")]
    NotPdf,

    /// MuPDF could not open or read the document
    #[error("{0}")]
    Pdf(String),

    /// A single page failed to load or produce text
    #[error("Page {page}: {reason}")]
    Page { page: usize, reason: String },

    /// The blocking extraction task did not complete
    #[error("Extraction task failed: {0}")]
    Task(String),
}

impl From<mupdf::Error> for ExtractError {
    fn from(err: mupdf::Error) -> Self {
        ExtractError::Pdf(err.to_string())
    }
}
