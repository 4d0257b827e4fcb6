//! Line-oriented content parser.
//!
//! A single forward pass over the section text with no lookahead: each
//! line is trimmed and classified by prefix. The parser never fails;
//! anything unrecognised degrades to a paragraph.

use std::sync::OnceLock;

use regex::Regex;

use crate::node::{ContentNode, HeadingLevel};

fn numbered_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\.\s+(.+)$").unwrap())
}

/// Maximum bullet nesting depth.
const MAX_BULLET_INDENT: u8 = 3;

/// Parse section content into a node sequence.
///
/// Classification precedence per line: blank, `### `, `## `, `- `/`* `,
/// `N. `, `[Source:` (case-insensitive), `|`, paragraph. Numbered
/// ordinals are a running counter reset by any list-breaking line;
/// a citation line keeps the counter alive so a list can carry its own
/// source annotations between items.
pub fn parse(content: &str) -> Vec<ContentNode> {
    if content.is_empty() {
        return Vec::new();
    }

    let mut nodes = Vec::new();
    let mut ordinal = 0u32;

    for line in content.split('\n') {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            nodes.push(ContentNode::Blank);
            ordinal = 0;
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("### ") {
            nodes.push(ContentNode::Heading {
                level: HeadingLevel::Three,
                text: rest.to_string(),
            });
            ordinal = 0;
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("## ") {
            nodes.push(ContentNode::Heading {
                level: HeadingLevel::Two,
                text: rest.to_string(),
            });
            ordinal = 0;
            continue;
        }

        if let Some(rest) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            nodes.push(ContentNode::Bullet {
                text: rest.to_string(),
                indent: bullet_indent(line),
            });
            ordinal = 0;
            continue;
        }

        if let Some(caps) = numbered_re().captures(trimmed) {
            // The literal number is discarded; ordinals are re-derived.
            ordinal += 1;
            nodes.push(ContentNode::Numbered {
                text: caps[2].to_string(),
                ordinal,
            });
            continue;
        }

        if is_citation_line(trimmed) {
            // Does not reset the numbered counter: a citation may sit
            // between items of the same list.
            nodes.push(ContentNode::Citation(trimmed.to_string()));
            continue;
        }

        if trimmed.starts_with('|') {
            ordinal = 0;
            if is_table_separator(trimmed) {
                continue;
            }
            nodes.push(ContentNode::TableRow(trimmed.to_string()));
            continue;
        }

        nodes.push(ContentNode::Paragraph(trimmed.to_string()));
        ordinal = 0;
    }

    nodes
}

/// Bullet indent from leading whitespace on the untrimmed line:
/// floor(ws / 2) + 1, clamped to [`MAX_BULLET_INDENT`].
fn bullet_indent(line: &str) -> u8 {
    let ws = line.len() - line.trim_start().len();
    (ws / 2 + 1).min(MAX_BULLET_INDENT as usize) as u8
}

fn is_citation_line(trimmed: &str) -> bool {
    trimmed
        .get(..8)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("[source:"))
}

/// A markdown table separator: only dashes, pipes and whitespace.
fn is_table_separator(trimmed: &str) -> bool {
    trimmed
        .chars()
        .all(|c| c == '-' || c == '|' || c.is_whitespace())
}
