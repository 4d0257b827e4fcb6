//! Error types for report orchestration.

use thiserror::Error;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur during report generation and delivery
#[derive(Error, Debug)]
pub enum ReportError {
    /// A provider was selected whose API key is not configured
    #[error("API key for {provider} is not configured")]
    MissingApiKey { provider: &'static str },

    /// A provider returned a non-success HTTP status
    #[error("{provider} API error ({status}): {message}")]
    Provider {
        provider: &'static str,
        status: u16,
        message: String,
    },

    /// Unknown model id
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Unknown section id
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// Unknown industry id in the questionnaire
    #[error("Unknown industry: {0}")]
    UnknownIndustry(String),

    /// Transport-level HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Email delivery failure
    #[error("Email delivery failed: {0}")]
    Email(String),

    /// Document rendering failure
    #[error("PDF rendering failed: {0}")]
    Pdf(#[from] compass_pdf::PdfError),

    /// Deck rendering failure
    #[error("Deck rendering failed: {0}")]
    Pptx(#[from] compass_pptx::PptxError),
}
