//! Slide data structures.
//!
//! The intermediate representation between the deck builder and the
//! OOXML writer. All text here is already flattened: no bold markers,
//! no inline citations.

/// Which layout a slide uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideLayout {
    /// Full-bleed brand background with centered white text
    /// (title and closing slides).
    Title,

    /// White background with a brand header bar and a body text box.
    #[default]
    Content,
}

/// Styling role of one body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// In-slide heading (from `## `).
    Heading,
    /// In-slide sub-heading (from `### `).
    SubHeading,
    /// Bullet item; `indent` selects the outline level.
    Bullet,
    /// Numbered item. The ordinal is already part of the text.
    Numbered,
    /// Plain body text.
    Text,
    /// Verbatim monospaced line (table rows).
    Mono,
    /// Large secondary line on title-layout slides.
    Subtitle,
    /// Small metadata line (dates, attribution).
    Meta,
    /// Italic tagline / branding line.
    Tagline,
    /// Centered italic placeholder for empty sections.
    Placeholder,
}

/// One paragraph of slide body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyLine {
    pub kind: LineKind,
    pub text: String,
    /// 1-based outline level, only meaningful for bullets.
    pub indent: u8,
}

impl BodyLine {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            indent: 1,
        }
    }

    pub fn bullet(text: impl Into<String>, indent: u8) -> Self {
        Self {
            kind: LineKind::Bullet,
            text: text.into(),
            indent,
        }
    }
}

/// A single slide in the deck.
#[derive(Debug, Clone, Default)]
pub struct Slide {
    /// Slide number (1-based, assigned by the builder).
    pub number: u32,

    pub layout: SlideLayout,

    /// Slide title (header bar text, or the big centered line on
    /// title-layout slides).
    pub title: String,

    /// Body paragraphs, in order.
    pub body: Vec<BodyLine>,

    /// Speaker notes (relocated citations).
    pub notes: Option<String>,

    /// Small footer tag on content slides (the section id).
    pub footer_tag: Option<String>,
}

impl Slide {
    /// Create a title-layout slide.
    pub fn title_slide(title: impl Into<String>) -> Self {
        Self {
            layout: SlideLayout::Title,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Create a content-layout slide.
    pub fn content_slide(title: impl Into<String>) -> Self {
        Self {
            layout: SlideLayout::Content,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Append a body line.
    pub fn push(&mut self, line: BodyLine) {
        self.body.push(line);
    }

    /// Check whether this slide has speaker notes.
    pub fn has_notes(&self) -> bool {
        self.notes.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_slide() {
        let slide = Slide::title_slide("Thank You");
        assert_eq!(slide.layout, SlideLayout::Title);
        assert_eq!(slide.title, "Thank You");
        assert!(!slide.has_notes());
    }

    #[test]
    fn test_content_slide_body() {
        let mut slide = Slide::content_slide("1. Executive Summary");
        slide.push(BodyLine::new(LineKind::Text, "A paragraph"));
        slide.push(BodyLine::bullet("nested", 2));

        assert_eq!(slide.layout, SlideLayout::Content);
        assert_eq!(slide.body.len(), 2);
        assert_eq!(slide.body[1].indent, 2);
    }
}
