//! Deck assembly from report sections.
//!
//! Builds the slide sequence: title slide, agenda, one or more content
//! slides per section, closing slide. Chunking is deterministic: the
//! same input always produces the same slide count.

use compass_content::{
    extract_citations, flatten, parse, ContentNode, HeadingLevel, ReportDocument, Section,
    PRODUCT_NAME, REPORT_TITLE,
};

use crate::slide::{BodyLine, LineKind, Slide};

/// Maximum countable items (bullets, numbered items, paragraphs) per
/// content slide before a new slide is started.
pub const MAX_ITEMS_PER_SLIDE: usize = 8;

/// Placeholder body for sections with no parseable content.
const EMPTY_SECTION_PLACEHOLDER: &str = "Content for this section will be available soon.";

/// A complete slide deck.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Builds a [`Deck`] from a report document.
pub struct DeckBuilder;

impl DeckBuilder {
    /// Assemble the full deck.
    pub fn build(doc: &ReportDocument) -> Deck {
        let mut slides = Vec::new();

        slides.push(Self::title_slide(doc));
        slides.push(Self::agenda_slide(doc));

        for section in &doc.sections {
            slides.extend(Self::section_slides(section));
        }

        slides.push(Self::closing_slide(doc));

        for (i, slide) in slides.iter_mut().enumerate() {
            slide.number = (i + 1) as u32;
        }

        Deck { slides }
    }

    fn title_slide(doc: &ReportDocument) -> Slide {
        let mut slide = Slide::title_slide(REPORT_TITLE);
        slide.push(BodyLine::new(LineKind::Subtitle, &doc.company_name));
        slide.push(BodyLine::new(LineKind::Subtitle, &doc.industry));
        slide.push(BodyLine::new(LineKind::Meta, doc.display_date()));
        slide.push(BodyLine::new(
            LineKind::Tagline,
            format!("Powered by {}", PRODUCT_NAME),
        ));
        slide
    }

    fn agenda_slide(doc: &ReportDocument) -> Slide {
        let mut slide = Slide::content_slide("Agenda");
        for (i, section) in doc.sections.iter().enumerate() {
            slide.push(BodyLine::new(
                LineKind::Text,
                format!("{}. {}", i + 1, section.title),
            ));
        }
        slide
    }

    fn closing_slide(doc: &ReportDocument) -> Slide {
        let mut slide = Slide::title_slide("Thank You");
        slide.push(BodyLine::new(
            LineKind::Meta,
            format!("Report generated by {}", PRODUCT_NAME),
        ));
        slide.push(BodyLine::new(LineKind::Meta, doc.display_date()));
        slide.push(BodyLine::new(
            LineKind::Tagline,
            format!("Prepared for {}", doc.company_name),
        ));
        slide
    }

    /// Build the contiguous slide run for one section.
    ///
    /// Citations are extracted from the raw content and attached as
    /// speaker notes on the first slide only. A section with no
    /// parseable content still yields exactly one placeholder slide.
    fn section_slides(section: &Section) -> Vec<Slide> {
        let nodes = parse(&section.content);
        let citations = extract_citations(&section.content);
        let chunks = chunk_nodes(&nodes);

        if chunks.is_empty() {
            let mut slide = Slide::content_slide(&section.title);
            slide.push(BodyLine::new(
                LineKind::Placeholder,
                EMPTY_SECTION_PLACEHOLDER,
            ));
            slide.notes = speaker_notes(&citations);
            slide.footer_tag = Some(section.id.clone());
            return vec![slide];
        }

        let total = chunks.len();
        chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| {
                let title = if total > 1 {
                    format!("{} ({}/{})", section.title, i + 1, total)
                } else {
                    section.title.clone()
                };

                let mut slide = Slide::content_slide(title);
                for node in chunk {
                    if let Some(line) = body_line(node) {
                        slide.push(line);
                    }
                }
                if i == 0 {
                    slide.notes = speaker_notes(&citations);
                }
                slide.footer_tag = Some(section.id.clone());
                slide
            })
            .collect()
    }
}

/// Convert a node to a slide body line.
///
/// Citations are relocated to speaker notes and blank lines carry no
/// slide text; neither produces a line here.
fn body_line(node: &ContentNode) -> Option<BodyLine> {
    match node {
        ContentNode::Heading { level, text } => {
            let kind = match level {
                HeadingLevel::Two => LineKind::Heading,
                HeadingLevel::Three => LineKind::SubHeading,
            };
            Some(BodyLine::new(kind, flatten(text)))
        }
        ContentNode::Paragraph(text) => Some(BodyLine::new(LineKind::Text, flatten(text))),
        ContentNode::Bullet { text, indent } => Some(BodyLine::bullet(flatten(text), *indent)),
        ContentNode::Numbered { text, ordinal } => Some(BodyLine::new(
            LineKind::Numbered,
            format!("{}. {}", ordinal, flatten(text)),
        )),
        ContentNode::TableRow(raw) => Some(BodyLine::new(LineKind::Mono, raw.clone())),
        ContentNode::Citation(_) | ContentNode::Blank => None,
    }
}

/// Group nodes into slide-sized chunks.
///
/// A heading starts a new chunk when the current one already has
/// visible content; bullets, numbered items and paragraphs count
/// toward [`MAX_ITEMS_PER_SLIDE`]; blank lines and citations neither
/// count nor break. Chunks with no visible content are discarded.
fn chunk_nodes(nodes: &[ContentNode]) -> Vec<Vec<&ContentNode>> {
    let mut chunks: Vec<Vec<&ContentNode>> = Vec::new();
    let mut current: Vec<&ContentNode> = Vec::new();
    let mut items = 0usize;

    for node in nodes {
        if node.is_heading() && has_visible(&current) {
            chunks.push(std::mem::take(&mut current));
            items = 0;
        }

        current.push(node);

        if node.is_slide_item() {
            items += 1;
        }

        if items >= MAX_ITEMS_PER_SLIDE {
            chunks.push(std::mem::take(&mut current));
            items = 0;
        }
    }

    if has_visible(&current) {
        chunks.push(current);
    }

    chunks
}

fn has_visible(chunk: &[&ContentNode]) -> bool {
    chunk
        .iter()
        .any(|node| !matches!(node, ContentNode::Blank))
}

fn speaker_notes(citations: &[String]) -> Option<String> {
    if citations.is_empty() {
        return None;
    }
    let list: Vec<String> = citations.iter().map(|c| format!("- {}", c)).collect();
    Some(format!("Sources:\n{}", list.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::SlideLayout;

    fn doc_with(content: &str) -> ReportDocument {
        ReportDocument {
            company_name: "Acme Ltd".to_string(),
            industry: "Manufacturing".to_string(),
            sections: vec![Section::new("risk", "2. Risk Quantification", content)],
            generated_at: "2026-01-05T12:00:00Z".to_string(),
        }
    }

    fn content_slides(deck: &Deck) -> Vec<&Slide> {
        // Strip the fixed title, agenda and closing slides.
        deck.slides[2..deck.slides.len() - 1].iter().collect()
    }

    #[test]
    fn test_deck_frame() {
        let deck = DeckBuilder::build(&doc_with("Some text."));
        assert_eq!(deck.len(), 4);

        assert_eq!(deck.slides[0].layout, SlideLayout::Title);
        assert_eq!(deck.slides[0].title, "Microsoft 365 E5 Business Case");
        assert_eq!(deck.slides[1].title, "Agenda");
        assert_eq!(deck.slides[3].title, "Thank You");

        // Slides are numbered consecutively.
        let numbers: Vec<u32> = deck.slides.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_agenda_lists_sections_in_order() {
        let mut doc = doc_with("x");
        doc.sections.push(Section::new("tco", "5. TCO Comparison", "y"));
        let deck = DeckBuilder::build(&doc);

        let agenda = &deck.slides[1];
        assert_eq!(agenda.body[0].text, "1. 2. Risk Quantification");
        assert_eq!(agenda.body[1].text, "2. 5. TCO Comparison");
    }

    #[test]
    fn test_ten_bullets_chunk_as_eight_and_two() {
        let content = (1..=10)
            .map(|i| format!("- point {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let deck = DeckBuilder::build(&doc_with(&content));

        let slides = content_slides(&deck);
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].body.len(), 8);
        assert_eq!(slides[1].body.len(), 2);

        assert_eq!(slides[0].title, "2. Risk Quantification (1/2)");
        assert_eq!(slides[1].title, "2. Risk Quantification (2/2)");
    }

    #[test]
    fn test_item_counts_match_parsed_nodes() {
        let content = "## H\n- a\n- b\n\nText one.\nText two.\n1. one\n2. two\n[Source: X]\n| r |";
        let nodes = parse(content);
        let expected = nodes.iter().filter(|n| n.is_slide_item()).count();

        let deck = DeckBuilder::build(&doc_with(content));
        let emitted: usize = content_slides(&deck)
            .iter()
            .flat_map(|s| &s.body)
            .filter(|l| {
                matches!(
                    l.kind,
                    LineKind::Bullet | LineKind::Numbered | LineKind::Text
                )
            })
            .count();

        assert_eq!(emitted, expected);
    }

    #[test]
    fn test_heading_forces_new_chunk() {
        let content = "## First\n- a\n## Second\n- b";
        let deck = DeckBuilder::build(&doc_with(content));

        let slides = content_slides(&deck);
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].body[0].kind, LineKind::Heading);
        assert_eq!(slides[1].body[0].text, "Second");
    }

    #[test]
    fn test_leading_heading_does_not_split() {
        let content = "## Only heading first\n- a";
        let deck = DeckBuilder::build(&doc_with(content));
        assert_eq!(content_slides(&deck).len(), 1);
    }

    #[test]
    fn test_empty_section_yields_one_placeholder_slide() {
        let deck = DeckBuilder::build(&doc_with(""));
        let slides = content_slides(&deck);

        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].body.len(), 1);
        assert_eq!(slides[0].body[0].kind, LineKind::Placeholder);
        assert_eq!(slides[0].footer_tag.as_deref(), Some("risk"));
    }

    #[test]
    fn test_citations_only_on_first_section_slide() {
        let mut content = String::from("[Source: IBM, https://ibm.com]\n[Source: DBIR]\n");
        for i in 1..=10 {
            content.push_str(&format!("- point {}\n", i));
        }
        let deck = DeckBuilder::build(&doc_with(&content));

        let slides = content_slides(&deck);
        assert_eq!(slides.len(), 2);
        let notes = slides[0].notes.as_deref().unwrap();
        assert!(notes.starts_with("Sources:"));
        assert!(notes.contains("- IBM, https://ibm.com"));
        assert!(notes.contains("- DBIR"));
        assert!(slides[1].notes.is_none());
    }

    #[test]
    fn test_slide_text_is_flattened() {
        let deck = DeckBuilder::build(&doc_with(
            "- **Bold** point [Source: IBM, https://ibm.com]",
        ));
        let slides = content_slides(&deck);
        assert_eq!(slides[0].body[0].text, "Bold point");
    }

    #[test]
    fn test_blank_lines_do_not_count_or_break() {
        let content = "- a\n\n- b\n\n- c";
        let deck = DeckBuilder::build(&doc_with(content));
        let slides = content_slides(&deck);
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].body.len(), 3);
    }

    #[test]
    fn test_deterministic_slide_count() {
        let content = "## H\n- a\n- b\n\nText.";
        let a = DeckBuilder::build(&doc_with(content));
        let b = DeckBuilder::build(&doc_with(content));
        assert_eq!(a.len(), b.len());
        let titles_a: Vec<&str> = a.slides.iter().map(|s| s.title.as_str()).collect();
        let titles_b: Vec<&str> = b.slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles_a, titles_b);
    }
}
