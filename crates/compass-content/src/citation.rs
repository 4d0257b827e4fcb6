//! Citation scanning and helpers.

use std::sync::OnceLock;

use regex::Regex;

fn citation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\[source:\s*([^\]]+)\]").unwrap())
}

/// Extract all citation bodies from raw content.
///
/// Matches `[Source: ...]` case-insensitively anywhere in the text.
/// Results are trimmed, deduplicated, and kept in order of first
/// appearance.
pub fn extract_citations(content: &str) -> Vec<String> {
    let mut citations = Vec::new();
    for caps in citation_re().captures_iter(content) {
        let body = caps[1].trim().to_string();
        if !citations.contains(&body) {
            citations.push(body);
        }
    }
    citations
}

/// Split a citation body into a display label and an optional URL.
///
/// The label is the text before the first comma (the whole body when
/// no comma is present); the URL is the first comma-separated part
/// that starts with `http://` or `https://`.
pub fn split_citation_body(body: &str) -> (String, Option<String>) {
    let label = body.split(',').next().unwrap_or(body).trim().to_string();

    let url = body
        .split(',')
        .map(str::trim)
        .find(|part| part.starts_with("http://") || part.starts_with("https://"))
        .map(str::to_string);

    (label, url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_dedupes_in_first_seen_order() {
        let citations = extract_citations("[Source: A][Source: B][Source: A]");
        assert_eq!(citations, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        let citations = extract_citations("x [source: IBM] y [SOURCE: IBM] z");
        assert_eq!(citations, vec!["IBM".to_string()]);
    }

    #[test]
    fn test_extract_keeps_full_body() {
        let citations = extract_citations("claim [Source: IBM, https://ibm.com, 2023]");
        assert_eq!(citations, vec!["IBM, https://ibm.com, 2023".to_string()]);
    }

    #[test]
    fn test_extract_none() {
        assert!(extract_citations("no citations at all").is_empty());
    }

    #[test]
    fn test_split_label_and_url() {
        let (label, url) = split_citation_body("IBM, https://ibm.com, 2023");
        assert_eq!(label, "IBM");
        assert_eq!(url.as_deref(), Some("https://ibm.com"));
    }

    #[test]
    fn test_split_without_comma() {
        let (label, url) = split_citation_body("Verizon DBIR");
        assert_eq!(label, "Verizon DBIR");
        assert!(url.is_none());
    }

    #[test]
    fn test_split_url_anywhere_in_body() {
        let (label, url) = split_citation_body("ICO enforcement, 2024, http://ico.org.uk");
        assert_eq!(label, "ICO enforcement");
        assert_eq!(url.as_deref(), Some("http://ico.org.uk"));
    }
}
