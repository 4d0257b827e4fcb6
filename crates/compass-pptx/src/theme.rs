//! Deck theme configuration.
//!
//! Colours and fonts for the generated deck, loadable from a TOML file
//! so white-label deployments can re-skin the deck without rebuilding.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PptxError, Result};

/// Visual theme for the generated deck.
///
/// Colours are six-digit RGB hex strings without a leading `#`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckTheme {
    /// Brand colour: title slide background, header bars, headings.
    #[serde(default = "default_primary")]
    pub primary: String,

    /// Content slide background.
    #[serde(default = "default_background")]
    pub background: String,

    /// Main body text colour.
    #[serde(default = "default_text_dark")]
    pub text_dark: String,

    /// Muted text colour (footers, placeholders).
    #[serde(default = "default_text_light")]
    pub text_light: String,

    /// Font for slide titles.
    #[serde(default = "default_font")]
    pub title_font: String,

    /// Font for body text.
    #[serde(default = "default_font")]
    pub body_font: String,

    /// Locale code for text runs (e.g. "en-GB").
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_primary() -> String {
    "1E3A5F".to_string()
}

fn default_background() -> String {
    "FFFFFF".to_string()
}

fn default_text_dark() -> String {
    "333333".to_string()
}

fn default_text_light() -> String {
    "666666".to_string()
}

fn default_font() -> String {
    "Calibri".to_string()
}

fn default_locale() -> String {
    "en-GB".to_string()
}

impl Default for DeckTheme {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            background: default_background(),
            text_dark: default_text_dark(),
            text_light: default_text_light(),
            title_font: default_font(),
            body_font: default_font(),
            locale: default_locale(),
        }
    }
}

impl DeckTheme {
    /// Load a theme from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let theme: Self = toml::from_str(toml_str)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Load a theme from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check that every colour is a six-digit hex value.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("primary", &self.primary),
            ("background", &self.background),
            ("text_dark", &self.text_dark),
            ("text_light", &self.text_light),
        ] {
            if value.len() != 6 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(PptxError::invalid_theme(format!(
                    "{} must be a six-digit hex colour, got \"{}\"",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
