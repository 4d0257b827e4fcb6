//! compass-pdf - PDF report generation via Typst
//!
//! Renders a [`ReportDocument`] into a paginated PDF: title page,
//! table of contents, and a continuously flowing content region with a
//! running `Page N of M` footer.
//!
//! # Architecture
//!
//! The pipeline has two stages:
//!
//! 1. **Transpiler** - Converts the report document to Typst markup
//! 2. **Compiler** - Compiles Typst markup to PDF bytes
//!
//! Pagination, line wrapping and the page counter are owned by the
//! Typst layout engine; the transpiler only describes content.

mod compiler;
mod error;
mod transpiler;

pub use compiler::Compiler;
pub use error::{PdfError, Result};
pub use transpiler::Transpiler;

use compass_content::ReportDocument;

/// Render a report document to PDF bytes.
pub fn render_document(doc: &ReportDocument) -> Result<Vec<u8>> {
    let markup = Transpiler::transpile(doc);
    Compiler::compile(&markup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_content::Section;

    fn sample_doc() -> ReportDocument {
        ReportDocument {
            company_name: "Acme Ltd".to_string(),
            industry: "Financial Services".to_string(),
            sections: vec![
                Section::new(
                    "executive-summary",
                    "1. Executive Summary",
                    "## Overview\n- point one\n- point two\n\n\
                     Plain text. [Source: IBM, https://ibm.com, 2023]",
                ),
                Section::new("risk-quantification", "2. Risk Quantification", ""),
            ],
            generated_at: "2026-01-05T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_render_document_produces_pdf() {
        let pdf = render_document(&sample_doc()).unwrap();
        assert!(pdf.starts_with(b"%PDF"), "output is not a PDF");
    }

    #[test]
    fn test_empty_sections_are_valid() {
        let doc = ReportDocument {
            company_name: "Acme Ltd".to_string(),
            industry: "Retail".to_string(),
            sections: Vec::new(),
            generated_at: "2026-01-05T12:00:00Z".to_string(),
        };
        let pdf = render_document(&doc).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
}
