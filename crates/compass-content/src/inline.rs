//! Inline-formatting policies.
//!
//! Two policies exist because the two output formats have different
//! text-styling capabilities:
//!
//! - the *rich* policy ([`rich_segments`]) resolves `**bold**` spans
//!   and `[Source: ...]` markers into typed segments for renderers
//!   that support styled runs and hyperlinks;
//! - the *flattening* policy ([`flatten`]) strips every marker down to
//!   plain text for contexts that only support bare strings. Citations
//!   are not lost: the deck renderer re-extracts them separately and
//!   relocates them to speaker notes.

use std::sync::OnceLock;

use regex::Regex;

use crate::citation::split_citation_body;

/// A run of text with at most one styling dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSegment {
    /// Unstyled text, passed through byte-for-byte.
    Plain(String),
    /// The inner text of a `**bold**` span.
    Bold(String),
    /// A `[Source: ...]` marker. `label` is the body up to the first
    /// comma (the whole body when there is no comma); `url` is the
    /// first comma-separated part that looks like an HTTP(S) URL.
    Citation {
        label: String,
        url: Option<String>,
    },
}

fn bold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap())
}

fn citation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\[source:\s*([^\]]*)\]").unwrap())
}

/// Rich policy: split text into plain/bold/citation segments.
///
/// Scans left to right; whichever marker starts first is consumed
/// next. Text outside markers is never reordered or altered.
pub fn rich_segments(text: &str) -> Vec<InlineSegment> {
    let mut segments = Vec::new();
    let mut rest = text;

    loop {
        let bold = bold_re().captures(rest);
        let citation = citation_re().captures(rest);

        let next = match (&bold, &citation) {
            (None, None) => break,
            (Some(b), None) => Marker::Bold(b),
            (None, Some(c)) => Marker::Citation(c),
            (Some(b), Some(c)) => {
                if b.get(0).unwrap().start() <= c.get(0).unwrap().start() {
                    Marker::Bold(b)
                } else {
                    Marker::Citation(c)
                }
            }
        };

        let (whole, segment) = match next {
            Marker::Bold(caps) => (
                caps.get(0).unwrap(),
                InlineSegment::Bold(caps[1].to_string()),
            ),
            Marker::Citation(caps) => {
                let (label, url) = split_citation_body(&caps[1]);
                (caps.get(0).unwrap(), InlineSegment::Citation { label, url })
            }
        };

        if whole.start() > 0 {
            segments.push(InlineSegment::Plain(rest[..whole.start()].to_string()));
        }
        segments.push(segment);
        rest = &rest[whole.end()..];
    }

    if !rest.is_empty() {
        segments.push(InlineSegment::Plain(rest.to_string()));
    }

    segments
}

enum Marker<'a, 'b> {
    Bold(&'a regex::Captures<'b>),
    Citation(&'a regex::Captures<'b>),
}

fn flatten_res() -> &'static [Regex; 6] {
    static RES: OnceLock<[Regex; 6]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            Regex::new(r"(?i)\[source:[^\]]*\]").unwrap(),
            Regex::new(r"(?i)\[citation:[^\]]*\]").unwrap(),
            Regex::new(r"\[\d+\]").unwrap(),
            Regex::new(r"\*\*([^*]+)\*\*").unwrap(),
            Regex::new(r"\*([^*]+)\*").unwrap(),
            Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap(),
        ]
    })
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Flattening policy: strip all markers, keeping inner text.
///
/// Citations and bracketed numeric refs are deleted outright, bold and
/// italic markers keep their inner text, markdown links collapse to
/// their link text, and whitespace runs collapse to single spaces.
/// Idempotent: flattening already-flattened text is a no-op.
pub fn flatten(text: &str) -> String {
    let [source, citation, numeric, bold, italic, link] = flatten_res();

    let result = source.replace_all(text, "");
    let result = citation.replace_all(&result, "");
    let result = numeric.replace_all(&result, "");
    let result = bold.replace_all(&result, "$1");
    let result = italic.replace_all(&result, "$1");
    let result = link.replace_all(&result, "$1");

    whitespace_re().replace_all(&result, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passthrough() {
        let segments = rich_segments("just plain text");
        assert_eq!(
            segments,
            vec![InlineSegment::Plain("just plain text".to_string())]
        );
    }

    #[test]
    fn test_bold_segments() {
        let segments = rich_segments("a **bold** move");
        assert_eq!(
            segments,
            vec![
                InlineSegment::Plain("a ".to_string()),
                InlineSegment::Bold("bold".to_string()),
                InlineSegment::Plain(" move".to_string()),
            ]
        );
    }

    #[test]
    fn test_paragraph_with_trailing_citation() {
        let segments = rich_segments("Plain text. [Source: IBM, https://ibm.com, 2023]");
        assert_eq!(
            segments,
            vec![
                InlineSegment::Plain("Plain text. ".to_string()),
                InlineSegment::Citation {
                    label: "IBM".to_string(),
                    url: Some("https://ibm.com".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_citation_without_url() {
        let segments = rich_segments("[Source: Industry estimates, 2024]");
        assert_eq!(
            segments,
            vec![InlineSegment::Citation {
                label: "Industry estimates".to_string(),
                url: None,
            }]
        );
    }

    #[test]
    fn test_citation_without_comma_uses_whole_body() {
        let segments = rich_segments("[Source: Verizon DBIR]");
        assert_eq!(
            segments,
            vec![InlineSegment::Citation {
                label: "Verizon DBIR".to_string(),
                url: None,
            }]
        );
    }

    #[test]
    fn test_earliest_marker_wins() {
        let segments = rich_segments("[Source: A] then **b**");
        assert!(matches!(segments[0], InlineSegment::Citation { .. }));
        assert_eq!(segments[2], InlineSegment::Bold("b".to_string()));

        let segments = rich_segments("**b** then [Source: A]");
        assert_eq!(segments[0], InlineSegment::Bold("b".to_string()));
        assert!(matches!(segments[2], InlineSegment::Citation { .. }));
    }

    #[test]
    fn test_flatten_strips_everything() {
        let text = "**Bold** claim [Source: IBM, https://ibm.com] with [ref](https://x.com) and [2].";
        assert_eq!(flatten(text), "Bold claim with ref and .");
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let text = "**Bold** and *italic* [Source: X] [Citation: Y] [3] [a](https://b.c)";
        let once = flatten(text);
        assert_eq!(flatten(&once), once);
    }

    #[test]
    fn test_flatten_collapses_whitespace() {
        assert_eq!(flatten("a   b\t c"), "a b c");
    }

    #[test]
    fn test_flatten_plain_text_unchanged() {
        assert_eq!(flatten("no markers here"), "no markers here");
    }
}
