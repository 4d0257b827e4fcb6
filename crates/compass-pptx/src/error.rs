//! Error types for PPTX generation.

use thiserror::Error;

/// Result type for PPTX operations
pub type Result<T> = std::result::Result<T, PptxError>;

/// Errors that can occur during PPTX generation
#[derive(Error, Debug)]
pub enum PptxError {
    /// Theme configuration is invalid
    #[error("Invalid theme: {reason}")]
    InvalidTheme { reason: String },

    /// ZIP archive error
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error (for theme files)
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl PptxError {
    /// Create an invalid theme error
    pub fn invalid_theme(reason: impl Into<String>) -> Self {
        Self::InvalidTheme {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PptxError::invalid_theme("primary is not a hex colour");
        assert!(err.to_string().contains("primary is not a hex colour"));
    }
}
