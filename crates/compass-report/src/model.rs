//! AI model catalog.
//!
//! A closed set of providers and models: adding a model means adding an
//! enum variant, and the compiler points at every dispatch site that
//! needs updating.

use crate::error::{ReportError, Result};

/// Supported AI providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    OpenAi,
    Anthropic,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }
}

/// Available models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelId {
    #[default]
    GeminiFlash,
    Gpt4oMini,
    ClaudeHaiku,
}

/// Static description of a model: provider, API model name, and
/// per-token pricing in USD.
#[derive(Debug, Clone, Copy)]
pub struct ModelSpec {
    pub provider: Provider,
    pub model: &'static str,
    pub display_name: &'static str,
    pub cost_per_input_token: f64,
    pub cost_per_output_token: f64,
}

impl ModelId {
    /// Every model, in display order.
    pub fn all() -> [ModelId; 3] {
        [Self::GeminiFlash, Self::Gpt4oMini, Self::ClaudeHaiku]
    }

    /// Stable identifier used in config files and the CLI.
    pub fn id(&self) -> &'static str {
        match self {
            Self::GeminiFlash => "gemini-flash",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::ClaudeHaiku => "claude-haiku",
        }
    }

    /// Resolve an identifier to a model.
    pub fn from_id(id: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|m| m.id() == id)
            .ok_or_else(|| ReportError::UnknownModel(id.to_string()))
    }

    pub fn spec(&self) -> ModelSpec {
        match self {
            Self::GeminiFlash => ModelSpec {
                provider: Provider::Google,
                model: "gemini-2.0-flash",
                display_name: "Gemini 2.0 Flash",
                cost_per_input_token: 0.000_000_1,  // $0.10 per 1M input
                cost_per_output_token: 0.000_000_4, // $0.40 per 1M output
            },
            Self::Gpt4oMini => ModelSpec {
                provider: Provider::OpenAi,
                model: "gpt-4o-mini",
                display_name: "GPT-4o Mini",
                cost_per_input_token: 0.000_000_15, // $0.15 per 1M input
                cost_per_output_token: 0.000_000_6, // $0.60 per 1M output
            },
            Self::ClaudeHaiku => ModelSpec {
                provider: Provider::Anthropic,
                model: "claude-3-5-haiku-latest",
                display_name: "Claude 3.5 Haiku",
                cost_per_input_token: 0.000_000_8, // $0.80 per 1M input
                cost_per_output_token: 0.000_004,  // $4.00 per 1M output
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for model in ModelId::all() {
            assert_eq!(ModelId::from_id(model.id()).unwrap(), model);
        }
    }

    #[test]
    fn test_unknown_model() {
        assert!(matches!(
            ModelId::from_id("gpt-9"),
            Err(ReportError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_default_model() {
        assert_eq!(ModelId::default(), ModelId::GeminiFlash);
        assert_eq!(ModelId::default().spec().provider, Provider::Google);
    }

    #[test]
    fn test_pricing_is_positive() {
        for model in ModelId::all() {
            let spec = model.spec();
            assert!(spec.cost_per_input_token > 0.0);
            assert!(spec.cost_per_output_token > spec.cost_per_input_token);
        }
    }
}
