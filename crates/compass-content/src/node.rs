//! Typed content nodes.
//!
//! Every line of a section's content maps to exactly one node; node
//! order mirrors line order.

use serde::{Deserialize, Serialize};

/// Heading depth recognised by the content format.
///
/// Only `## ` and `### ` exist in the wire format; deeper prefixes
/// fall through to [`ContentNode::Paragraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    Two,
    Three,
}

/// One structurally-classified line of section content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentNode {
    /// A `## ` or `### ` heading.
    Heading { level: HeadingLevel, text: String },
    /// A plain text line.
    Paragraph(String),
    /// A `- ` or `* ` list item. `indent` is 1-based, clamped to 3.
    Bullet { text: String, indent: u8 },
    /// An `N. ` list item. `ordinal` is locally assigned, starting at 1
    /// after each list-breaking line; the source number is discarded.
    Numbered { text: String, ordinal: u32 },
    /// A standalone `[Source: ...]` line, kept verbatim.
    Citation(String),
    /// A `|`-prefixed table row, kept verbatim (separator rows are
    /// dropped by the parser).
    TableRow(String),
    /// An empty line. Paragraph-break marker; resets list numbering.
    Blank,
}

impl ContentNode {
    /// Whether this node counts toward the per-slide item limit.
    pub fn is_slide_item(&self) -> bool {
        matches!(
            self,
            Self::Bullet { .. } | Self::Numbered { .. } | Self::Paragraph(_)
        )
    }

    /// Whether this node is a heading of any level.
    pub fn is_heading(&self) -> bool {
        matches!(self, Self::Heading { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_item_classification() {
        assert!(ContentNode::Paragraph("text".into()).is_slide_item());
        assert!(ContentNode::Bullet {
            text: "point".into(),
            indent: 1
        }
        .is_slide_item());
        assert!(ContentNode::Numbered {
            text: "step".into(),
            ordinal: 1
        }
        .is_slide_item());

        assert!(!ContentNode::Blank.is_slide_item());
        assert!(!ContentNode::Citation("[Source: X]".into()).is_slide_item());
        assert!(!ContentNode::TableRow("| A |".into()).is_slide_item());
        assert!(!ContentNode::Heading {
            level: HeadingLevel::Two,
            text: "Overview".into()
        }
        .is_slide_item());
    }
}
