//! Report and section data model.
//!
//! A [`ReportDocument`] is the input to both renderers. It is built
//! fresh for every export request from caller-supplied section texts
//! (which may have been edited since generation) and discarded when the
//! request completes.

use serde::{Deserialize, Serialize};

/// One named block of report content.
///
/// `id` is a stable slug used for ordering and cross-referencing,
/// `title` is the human-facing heading (already numbered by the
/// caller), and `content` is free text produced by an AI call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl Section {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// The full input to an export request.
///
/// Field names follow the JSON wire format of the export endpoints
/// (`companyName`, `generatedAt`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub company_name: String,
    pub industry: String,
    pub sections: Vec<Section>,
    /// ISO-8601 timestamp of generation.
    pub generated_at: String,
}

impl ReportDocument {
    /// Document metadata title, e.g. for PDF/PPTX properties.
    pub fn document_title(&self) -> String {
        format!("{} - {}", crate::REPORT_TITLE, self.company_name)
    }

    /// Human-facing date line derived from `generated_at`.
    pub fn display_date(&self) -> String {
        crate::dates::format_display_date(&self.generated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_round_trip() {
        let json = r#"{
            "companyName": "Acme Ltd",
            "industry": "Legal Services",
            "sections": [
                {"id": "executive-summary", "title": "1. Executive Summary", "content": "Hello."}
            ],
            "generatedAt": "2026-01-05T12:00:00Z"
        }"#;

        let doc: ReportDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.company_name, "Acme Ltd");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].id, "executive-summary");

        let back = serde_json::to_string(&doc).unwrap();
        assert!(back.contains("\"companyName\""));
        assert!(back.contains("\"generatedAt\""));
    }

    #[test]
    fn test_document_title() {
        let doc = ReportDocument {
            company_name: "Acme Ltd".to_string(),
            industry: "Retail".to_string(),
            sections: Vec::new(),
            generated_at: "2026-01-05T12:00:00Z".to_string(),
        };
        assert_eq!(
            doc.document_title(),
            "Microsoft 365 E5 Business Case - Acme Ltd"
        );
    }
}
