//! Export entry points.
//!
//! Thin, stateless wrappers over the two renderers. Every export
//! request regenerates from the caller-supplied section texts; nothing
//! is cached between requests.

use compass_content::ReportDocument;
use compass_pptx::DeckTheme;

use crate::error::Result;

/// Render the report as a paginated PDF document.
pub fn generate_document(doc: &ReportDocument) -> Result<Vec<u8>> {
    Ok(compass_pdf::render_document(doc)?)
}

/// Render the report as a PPTX deck.
pub fn generate_deck(doc: &ReportDocument, theme: &DeckTheme) -> Result<Vec<u8>> {
    Ok(compass_pptx::render_deck(doc, theme)?)
}

/// Download filename for an exported report, e.g.
/// `E5-Business-Case-Acme-Ltd.pdf`.
pub fn download_filename(company_name: &str, extension: &str) -> String {
    let safe: String = company_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("E5-Business-Case-{}.{}", safe, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_content::Section;

    #[test]
    fn test_download_filename() {
        assert_eq!(
            download_filename("Acme Ltd", "pdf"),
            "E5-Business-Case-Acme-Ltd.pdf"
        );
        assert_eq!(
            download_filename("Müller & Co.", "pptx"),
            "E5-Business-Case-M-ller---Co-.pptx"
        );
    }

    #[test]
    fn test_both_exports_from_one_document() {
        let doc = ReportDocument {
            company_name: "Acme Ltd".to_string(),
            industry: "Retail & E-commerce".to_string(),
            sections: vec![Section::new(
                "executive-summary",
                "1. Executive Summary",
                "## Overview\n- one\n\nBody text. [Source: IBM, https://ibm.com]",
            )],
            generated_at: "2026-01-05T12:00:00Z".to_string(),
        };

        let pdf = generate_document(&doc).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let pptx = generate_deck(&doc, &DeckTheme::default()).unwrap();
        // ZIP local file header magic
        assert_eq!(&pptx[0..2], b"PK");
    }
}
