//! # compass-pptx
//!
//! Board-ready PowerPoint deck generation from report sections.
//!
//! The deck renderer produces a title slide, an agenda slide, one or
//! more content slides per section (chunked to a fixed item budget),
//! and a closing slide. Inline markers are flattened out of slide
//! text; citations are re-extracted from the raw content and relocated
//! to the speaker notes of each section's first slide.
//!
//! ## Example
//!
//! ```rust,ignore
//! use compass_content::ReportDocument;
//! use compass_pptx::{render_deck, DeckTheme};
//!
//! let doc: ReportDocument = serde_json::from_str(payload)?;
//! let pptx_bytes = render_deck(&doc, &DeckTheme::default())?;
//! std::fs::write("deck.pptx", pptx_bytes)?;
//! ```

pub mod deck;
pub mod error;
pub mod slide;
pub mod theme;
pub mod writer;

// Re-exports
pub use deck::{Deck, DeckBuilder, MAX_ITEMS_PER_SLIDE};
pub use error::{PptxError, Result};
pub use slide::{BodyLine, LineKind, Slide, SlideLayout};
pub use theme::DeckTheme;
pub use writer::PptxWriter;

use compass_content::{ReportDocument, PRODUCT_NAME};

/// Render a report document to PPTX bytes with the given theme.
pub fn render_deck(doc: &ReportDocument, theme: &DeckTheme) -> Result<Vec<u8>> {
    let deck = DeckBuilder::build(doc);

    let mut writer = PptxWriter::new(theme.clone())
        .with_title(doc.document_title())
        .with_author(PRODUCT_NAME)
        .with_created(doc.generated_at.clone());
    writer.add_slides(deck.slides);
    writer.generate()
}

/// PPTX-related constants
pub mod constants {
    /// Widescreen 16:9 slide width in EMU (13.333" width)
    pub const SLIDE_WIDTH_EMU: i64 = 12_192_000;

    /// Widescreen 16:9 slide height in EMU (7.5" height)
    pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

    /// EMU per inch
    pub const EMU_PER_INCH: i64 = 914_400;

    /// PresentationML namespace
    pub const NS_PRESENTATION: &str =
        "http://schemas.openxmlformats.org/presentationml/2006/main";

    /// DrawingML namespace
    pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// Relationships namespace
    pub const NS_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// Slide relationship type
    pub const REL_TYPE_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

    /// Slide layout relationship type
    pub const REL_TYPE_SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

    /// Slide master relationship type
    pub const REL_TYPE_SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

    /// Notes slide relationship type
    pub const REL_TYPE_NOTES_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide";

    /// Theme relationship type
    pub const REL_TYPE_THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
}
