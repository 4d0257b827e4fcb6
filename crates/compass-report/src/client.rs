//! Provider-dispatched AI generation client.
//!
//! One blocking HTTP client serving three provider APIs behind a
//! unified request/response shape. Dispatch is an exhaustive match on
//! [`Provider`]; there is no string-keyed lookup to fall through.

use std::time::Instant;

use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::AiConfig;
use crate::error::{ReportError, Result};
use crate::model::{ModelId, ModelSpec, Provider};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// A single generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system: Option<String>,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A completed generation with usage accounting.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub text: String,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_usd: f64,
    pub duration_ms: u128,
}

/// Blocking AI client with injected configuration.
#[derive(Debug, Clone)]
pub struct AiClient {
    http: Client,
    config: AiConfig,
}

impl AiClient {
    /// Create a client from an explicit configuration.
    pub fn new(config: AiConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// The configured default model.
    pub fn default_model(&self) -> ModelId {
        self.config.default_model
    }

    /// Generate text with the given model.
    pub fn generate(&self, model: ModelId, request: &GenerationRequest) -> Result<GenerationResponse> {
        let spec = model.spec();
        let started = Instant::now();

        let (text, input_tokens, output_tokens) = match spec.provider {
            Provider::Google => self.call_gemini(&spec, request)?,
            Provider::OpenAi => self.call_openai(&spec, request)?,
            Provider::Anthropic => self.call_anthropic(&spec, request)?,
        };

        let cost_usd = input_tokens as f64 * spec.cost_per_input_token
            + output_tokens as f64 * spec.cost_per_output_token;
        let duration_ms = started.elapsed().as_millis();

        debug!(
            model = spec.model,
            input_tokens, output_tokens, cost_usd, duration_ms, "generation complete"
        );

        Ok(GenerationResponse {
            text,
            model: spec.model.to_string(),
            input_tokens,
            output_tokens,
            cost_usd,
            duration_ms,
        })
    }

    fn call_gemini(
        &self,
        spec: &ModelSpec,
        request: &GenerationRequest,
    ) -> Result<(String, u64, u64)> {
        let api_key = self.config.key_for(spec.provider)?;

        let mut contents = Vec::new();
        if let Some(system) = &request.system {
            // Gemini v1beta has no system role; prime with an exchange.
            contents.push(json!({"role": "user", "parts": [{"text": system}]}));
            contents.push(json!({
                "role": "model",
                "parts": [{"text": "Understood. I will follow these instructions."}]
            }));
        }
        contents.push(json!({"role": "user", "parts": [{"text": request.prompt}]}));

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_BASE_URL, spec.model, api_key
        );
        let body = json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": request.max_tokens,
                "temperature": request.temperature,
            }
        });

        let data = self.post_json(spec, &url, &body, &[])?;

        let text = data
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let input_tokens = u64_at(&data, "/usageMetadata/promptTokenCount");
        let output_tokens = u64_at(&data, "/usageMetadata/candidatesTokenCount");

        Ok((text, input_tokens, output_tokens))
    }

    fn call_openai(
        &self,
        spec: &ModelSpec,
        request: &GenerationRequest,
    ) -> Result<(String, u64, u64)> {
        let api_key = self.config.key_for(spec.provider)?;

        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": request.prompt}));

        let body = json!({
            "model": spec.model,
            "messages": messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        let auth = format!("Bearer {}", api_key);
        let data = self.post_json(spec, OPENAI_URL, &body, &[("Authorization", &auth)])?;

        let text = data
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let input_tokens = u64_at(&data, "/usage/prompt_tokens");
        let output_tokens = u64_at(&data, "/usage/completion_tokens");

        Ok((text, input_tokens, output_tokens))
    }

    fn call_anthropic(
        &self,
        spec: &ModelSpec,
        request: &GenerationRequest,
    ) -> Result<(String, u64, u64)> {
        let api_key = self.config.key_for(spec.provider)?;

        let mut body = json!({
            "model": spec.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": [{"role": "user", "content": request.prompt}],
        });
        if let Some(system) = &request.system {
            body["system"] = json!(system);
        }

        let data = self.post_json(
            spec,
            ANTHROPIC_URL,
            &body,
            &[
                ("x-api-key", api_key),
                ("anthropic-version", ANTHROPIC_VERSION),
            ],
        )?;

        // Concatenate all text blocks of the response.
        let text = data
            .pointer("/content")
            .and_then(Value::as_array)
            .map(|blocks| {
                blocks
                    .iter()
                    .filter(|b| b.pointer("/type").and_then(Value::as_str) == Some("text"))
                    .filter_map(|b| b.pointer("/text").and_then(Value::as_str))
                    .collect::<String>()
            })
            .unwrap_or_default();
        let input_tokens = u64_at(&data, "/usage/input_tokens");
        let output_tokens = u64_at(&data, "/usage/output_tokens");

        Ok((text, input_tokens, output_tokens))
    }

    /// POST a JSON body and return the parsed response, mapping
    /// non-success statuses to a provider error.
    fn post_json(
        &self,
        spec: &ModelSpec,
        url: &str,
        body: &Value,
        headers: &[(&str, &str)],
    ) -> Result<Value> {
        let mut req = self.http.post(url).json(body);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let response = req.send()?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| "unknown error".to_string());
            return Err(ReportError::Provider {
                provider: spec.provider.name(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json()?)
    }
}

fn u64_at(data: &Value, pointer: &str) -> u64 {
    data.pointer(pointer).and_then(Value::as_u64).unwrap_or(0)
}
