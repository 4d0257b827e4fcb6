//! compass-content - Content model for E5 Compass reports
//!
//! This crate provides the shared content pipeline used by both report
//! renderers: the section/report data model, the line-oriented parser
//! that turns AI-generated section text into typed content nodes, the
//! two inline-formatting policies (rich and flattening), and citation
//! extraction.

pub mod citation;
pub mod dates;
pub mod inline;
pub mod node;
pub mod parser;
pub mod section;

pub use citation::{extract_citations, split_citation_body};
pub use inline::{flatten, rich_segments, InlineSegment};
pub use node::{ContentNode, HeadingLevel};
pub use parser::parse;
pub use section::{ReportDocument, Section};

/// Product name used in attribution lines and document metadata.
pub const PRODUCT_NAME: &str = "E5 Compass";

/// Report title shown on title pages and in document metadata.
pub const REPORT_TITLE: &str = "Microsoft 365 E5 Business Case";
