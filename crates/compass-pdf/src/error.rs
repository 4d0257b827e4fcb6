//! Error types for PDF generation.

use thiserror::Error;

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Errors that can occur during PDF generation.
///
/// Content-shape irregularities never reach this type; malformed
/// markup constructs degrade to plain paragraphs upstream. An error
/// here means no usable bytes could be produced at all.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Typst compilation or PDF export error
    #[error("PDF compilation failed: {0}")]
    Compilation(String),
}
