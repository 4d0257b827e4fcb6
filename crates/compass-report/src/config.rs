//! Generation configuration.
//!
//! All configuration is an explicit struct handed to the client at
//! construction. Nothing in this crate reads the environment on its
//! own; [`AiConfig::from_env`] exists for binaries to call at startup.

use std::time::Duration;

use crate::error::{ReportError, Result};
use crate::model::{ModelId, Provider};

/// Configuration for the AI client.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,

    /// Model used when the caller does not pick one.
    pub default_model: ModelId,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openai_api_key: None,
            anthropic_api_key: None,
            default_model: ModelId::default(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl AiConfig {
    /// Build a config from the conventional environment variables
    /// (`GEMINI_API_KEY`, `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`).
    ///
    /// Intended for binary entry points; library code receives the
    /// resulting struct instead of touching the environment.
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            ..Default::default()
        }
    }

    /// The API key for a provider, or a missing-key error.
    pub fn key_for(&self, provider: Provider) -> Result<&str> {
        let key = match provider {
            Provider::Google => &self.gemini_api_key,
            Provider::OpenAi => &self.openai_api_key,
            Provider::Anthropic => &self.anthropic_api_key,
        };
        key.as_deref().ok_or(ReportError::MissingApiKey {
            provider: provider.name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_lookup() {
        let config = AiConfig {
            openai_api_key: Some("sk-test".to_string()),
            ..Default::default()
        };

        assert_eq!(config.key_for(Provider::OpenAi).unwrap(), "sk-test");
        assert!(matches!(
            config.key_for(Provider::Google),
            Err(ReportError::MissingApiKey { provider: "Google" })
        ));
    }
}
