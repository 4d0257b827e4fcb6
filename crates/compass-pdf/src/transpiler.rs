//! Report document to Typst markup transpiler.
//!
//! Emits the full document: metadata, page setup with the running
//! footer, title page, table of contents, and the content flow built
//! from parsed section nodes. Page breaks inside the content flow are
//! left entirely to the layout engine.

use std::fmt::Write;

use compass_content::{
    parse, rich_segments, ContentNode, HeadingLevel, InlineSegment, ReportDocument,
    PRODUCT_NAME, REPORT_TITLE,
};

// Palette shared with the deck renderer's defaults.
const PRIMARY: &str = "#1e3a5f";
const INK: &str = "#1f2937";
const SLATE: &str = "#475569";
const MUTED: &str = "#6b7280";
const CITATION: &str = "#64748b";
const FAINT: &str = "#94a3b8";
const RULE: &str = "#e2e8f0";

/// Transpiler for converting a report document to Typst markup
pub struct Transpiler;

impl Transpiler {
    /// Transpile a full report document.
    pub fn transpile(doc: &ReportDocument) -> String {
        let mut out = String::new();

        Self::write_preamble(&mut out, doc);
        Self::write_title_page(&mut out, doc);
        Self::write_contents_page(&mut out, doc);

        for section in &doc.sections {
            Self::write_section(&mut out, &section.title, &section.content);
        }

        out
    }

    fn write_preamble(out: &mut String, doc: &ReportDocument) {
        let _ = writeln!(
            out,
            "#set document(title: \"{}\", author: \"{}\")",
            escape_string(&doc.document_title()),
            escape_string(PRODUCT_NAME),
        );
        let _ = writeln!(
            out,
            r##"#set page(
  paper: "a4",
  margin: (x: 50pt, top: 60pt, bottom: 70pt),
  footer: context [
    #line(length: 100%, stroke: 0.5pt + rgb("{RULE}"))
    #v(4pt)
    #text(size: 8pt, fill: rgb("{FAINT}"))[{product}]
    #h(1fr)
    #text(size: 8pt, fill: rgb("{FAINT}"))[Confidential]
    #h(1fr)
    #text(size: 8pt, fill: rgb("{FAINT}"))[Page #counter(page).display() of #counter(page).final().first()]
  ],
)
#set text(size: 10pt, fill: rgb("{INK}"))
#set par(leading: 0.65em)
#show raw: set text(size: 8pt)
#show link: set text(fill: rgb("#1d4ed8"))
#show heading.where(level: 1): it => block(
  width: 100%,
  above: 24pt,
  below: 14pt,
  inset: (bottom: 6pt),
  stroke: (bottom: 2pt + rgb("{PRIMARY}")),
  text(size: 16pt, weight: "bold", fill: rgb("{PRIMARY}"), it.body),
)
#show heading.where(level: 2): set text(size: 13pt, fill: rgb("{INK}"))
#show heading.where(level: 3): set text(size: 11pt, fill: rgb("#334155"))"##,
            product = escape_markup(PRODUCT_NAME),
        );
    }

    fn write_title_page(out: &mut String, doc: &ReportDocument) {
        let _ = writeln!(
            out,
            r##"#align(center + horizon)[
  #text(size: 28pt, weight: "bold", fill: rgb("{PRIMARY}"))[{title}]
  #v(10pt)
  #line(length: 80pt, stroke: 2pt + rgb("{PRIMARY}"))
  #v(28pt)
  #text(size: 20pt, weight: "bold", fill: rgb("#0f172a"))[{company}]
  #v(4pt)
  #text(size: 16pt, fill: rgb("{SLATE}"))[{industry}]
  #v(18pt)
  #text(size: 11pt, fill: rgb("{SLATE}"))[{date}]
  #v(48pt)
  #text(size: 10pt, fill: rgb("{FAINT}"))[Prepared by {product}]
]
#pagebreak()"##,
            title = escape_block(REPORT_TITLE),
            company = escape_block(&doc.company_name),
            industry = escape_block(&doc.industry),
            date = escape_block(&doc.display_date()),
            product = escape_markup(PRODUCT_NAME),
        );
    }

    fn write_contents_page(out: &mut String, doc: &ReportDocument) {
        let _ = writeln!(
            out,
            "#text(size: 20pt, weight: \"bold\", fill: rgb(\"{PRIMARY}\"))[Contents]\n#v(16pt)",
        );

        // Titles arrive pre-numbered; only the row ordinal is derived.
        for (i, section) in doc.sections.iter().enumerate() {
            let _ = writeln!(
                out,
                r#"#block(width: 100%, inset: (bottom: 6pt), stroke: (bottom: 0.5pt + rgb("{RULE}")), below: 10pt)[
  #text(size: 11pt, fill: rgb("{MUTED}"))[{number}\.]
  #h(6pt)
  #text(size: 11pt, fill: rgb("{INK}"))[{title}]
]"#,
                number = i + 1,
                title = escape_block(&section.title),
            );
        }

        let _ = writeln!(out, "#pagebreak()");
    }

    /// Append one section: its title as a level-1 heading, then every
    /// parsed node in order. Never fails; every node renders something
    /// (or deliberately nothing).
    fn write_section(out: &mut String, title: &str, content: &str) {
        let _ = writeln!(out, "= {}\n", escape_markup(title));

        let nodes = parse(content);
        if nodes.is_empty() {
            let _ = writeln!(
                out,
                "#text(fill: rgb(\"{MUTED}\"), style: \"italic\")[Content for this section will be available soon.]\n",
            );
            return;
        }

        for (i, node) in nodes.iter().enumerate() {
            let tight = matches!(
                (node, nodes.get(i + 1)),
                (ContentNode::Bullet { .. }, Some(ContentNode::Bullet { .. }))
                    | (ContentNode::Numbered { .. }, Some(ContentNode::Numbered { .. }))
                    | (ContentNode::TableRow(_), Some(ContentNode::TableRow(_)))
            );

            if let Some(rendered) = Self::transpile_node(node) {
                out.push_str(&rendered);
                out.push_str(if tight { "\n" } else { "\n\n" });
            }
        }
    }

    /// Transpile a single node to a markup line.
    fn transpile_node(node: &ContentNode) -> Option<String> {
        match node {
            ContentNode::Heading { level, text } => {
                let marker = match level {
                    HeadingLevel::Two => "==",
                    HeadingLevel::Three => "===",
                };
                Some(format!("{} {}", marker, Self::transpile_inline(text)))
            }

            ContentNode::Paragraph(text) => Some(Self::transpile_inline(text)),

            // The document flow is flat: bullet nesting levels are a
            // deck-only concern.
            ContentNode::Bullet { text, .. } => {
                Some(format!("- {}", Self::transpile_inline(text)))
            }

            ContentNode::Numbered { text, ordinal } => {
                Some(format!("{}. {}", ordinal, Self::transpile_inline(text)))
            }

            ContentNode::Citation(raw) => Some(format!(
                "#text(size: 8pt, fill: rgb(\"{CITATION}\"), style: \"italic\")[{}]",
                escape_markup(raw)
            )),

            ContentNode::TableRow(raw) => {
                Some(format!("#raw(\"{}\")", escape_string(raw)))
            }

            ContentNode::Blank => Some("#v(6pt)".to_string()),
        }
    }

    /// Transpile node text with the rich inline policy: bold spans and
    /// citation markers become styled runs, everything else passes
    /// through escaped.
    fn transpile_inline(text: &str) -> String {
        let mut out = String::new();

        for segment in rich_segments(text) {
            match segment {
                InlineSegment::Plain(t) => out.push_str(&escape_markup(&t)),
                InlineSegment::Bold(t) => {
                    let _ = write!(out, "#strong[{}]", escape_block(&t));
                }
                InlineSegment::Citation { label, url } => match url {
                    Some(url) => {
                        let _ = write!(
                            out,
                            "#link(\"{}\")[#text(size: 8pt, fill: rgb(\"{CITATION}\"), style: \"italic\")[{}]]",
                            escape_string(&url),
                            escape_block(&label),
                        );
                    }
                    None => {
                        let _ = write!(
                            out,
                            "#text(size: 8pt, fill: rgb(\"{CITATION}\"), style: \"italic\")[{}]",
                            escape_markup(&format!("[{}]", label)),
                        );
                    }
                },
            }
        }

        out
    }
}

/// Escape text for Typst markup context.
///
/// Covers every character that can open a markup construct, including
/// line-leading list/heading markers that could otherwise be forged by
/// content text.
fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '\\' | '#' | '$' | '*' | '_' | '`' | '[' | ']' | '<' | '>' | '@' | '/' | '~' | '+'
                | '=' | '-'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape text that lands at the start of a content block, where a
/// leading `N.` would read as an enum marker.
fn escape_block(s: &str) -> String {
    let escaped = escape_markup(s);
    if let Some(pos) = escaped.find('.') {
        if pos > 0 && escaped[..pos].chars().all(|c| c.is_ascii_digit()) {
            return format!("{}\\.{}", &escaped[..pos], &escaped[pos + 1..]);
        }
    }
    escaped
}

/// Escape text for a Typst string literal.
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_content::Section;

    fn sample_doc() -> ReportDocument {
        ReportDocument {
            company_name: "Acme Ltd".to_string(),
            industry: "Legal Services".to_string(),
            sections: vec![Section::new(
                "executive-summary",
                "1. Executive Summary",
                "## Overview\n\n**Bold** claim. [Source: IBM, https://ibm.com, 2023]\n- a point",
            )],
            generated_at: "2026-01-05T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_metadata_from_company() {
        let markup = Transpiler::transpile(&sample_doc());
        assert!(markup
            .contains("#set document(title: \"Microsoft 365 E5 Business Case - Acme Ltd\""));
        assert!(markup.contains("author: \"E5 Compass\""));
    }

    #[test]
    fn test_title_page_and_contents() {
        let markup = Transpiler::transpile(&sample_doc());
        assert!(markup.contains("Prepared by E5 Compass"));
        assert!(markup.contains("5 January 2026"));
        assert!(markup.contains("[Contents]"));
        assert!(markup.contains("1. Executive Summary"));
    }

    #[test]
    fn test_section_nodes() {
        let markup = Transpiler::transpile(&sample_doc());
        assert!(markup.contains("= 1. Executive Summary"));
        assert!(markup.contains("== Overview"));
        assert!(markup.contains("#strong[Bold]"));
        assert!(markup.contains("#link(\"https://ibm.com\")"));
        assert!(markup.contains("- a point"));
    }

    #[test]
    fn test_citation_without_url_renders_badge() {
        let node = ContentNode::Paragraph("Claim. [Source: Industry estimates]".to_string());
        let rendered = Transpiler::transpile_node(&node).unwrap();
        assert!(rendered.contains("\\[Industry estimates\\]"));
        assert!(!rendered.contains("#link"));
    }

    #[test]
    fn test_numbered_uses_local_ordinals() {
        let mut out = String::new();
        Transpiler::write_section(&mut out, "T", "5. foo\n7. bar");
        assert!(out.contains("1. foo"));
        assert!(out.contains("2. bar"));
    }

    #[test]
    fn test_table_separator_dropped_data_row_kept() {
        let mut out = String::new();
        Transpiler::write_section(&mut out, "T", "| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(out.contains("#raw(\"| A | B |\")"));
        assert!(out.contains("#raw(\"| 1 | 2 |\")"));
        assert!(!out.contains("---"));
    }

    #[test]
    fn test_empty_section_gets_placeholder_body() {
        let mut out = String::new();
        Transpiler::write_section(&mut out, "3. Vendor Consolidation", "");
        assert!(out.contains("Content for this section will be available soon."));
    }

    #[test]
    fn test_blank_inserts_spacing() {
        let mut out = String::new();
        Transpiler::write_section(&mut out, "T", "a\n\nb");
        assert!(out.contains("#v(6pt)"));
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup("a*b"), "a\\*b");
        assert_eq!(escape_markup("#set"), "\\#set");
        assert_eq!(escape_markup("[x]"), "\\[x\\]");
        assert_eq!(escape_markup("= not a heading"), "\\= not a heading");
        assert_eq!(escape_markup("£5-8/user"), "£5\\-8\\/user");
        assert_eq!(escape_markup("plain"), "plain");
    }

    #[test]
    fn test_escape_block_defuses_enum_marker() {
        assert_eq!(escape_block("1. Executive Summary"), "1\\. Executive Summary");
        assert_eq!(escape_block("no marker here"), "no marker here");
        // Only a leading all-digit prefix is a marker.
        assert_eq!(escape_block("v1. release"), "v1. release");
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_string("back\\slash"), "back\\\\slash");
    }
}
