//! Gemini provider implementation
//!
//! This module implements the [`TextGenerator`] trait for Google's Gemini
//! `generateContent` REST endpoint.
//! See: https://ai.google.dev/api/generate-content
//!
//! # Examples
//!
//! ```no_run
//! use judge_llm::{GenerationRequest, TextGenerator};
//! use judge_llm::providers::{GeminiConfig, GeminiProvider, gemini::DEFAULT_GEMINI_MODEL};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GeminiConfig::new("AIza...").with_timeout(60);
//!     let provider = GeminiProvider::with_config(config)?;
//!
//!     let request = GenerationRequest::builder(DEFAULT_GEMINI_MODEL, "Hello!").build();
//!     let response = provider.generate(request).await?;
//!     println!("{}", response.text);
//!
//!     Ok(())
//! }
//! ```

use crate::{
    GenerationRequest, GenerationResponse, LLMError, Result, TextGenerator, TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default Gemini REST base URL
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model used for narrative generation
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for Gemini provider
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`
    pub api_key: String,

    /// Base URL for the Gemini API (default: "https://generativelanguage.googleapis.com/v1beta")
    pub api_base: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `GEMINI_API_KEY` and, optionally, the base URL
    /// from `GEMINI_API_BASE`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                LLMError::ConfigurationError(
                    "GEMINI_API_KEY environment variable not set".to_string(),
                )
            })?;

        let api_base = std::env::var("GEMINI_API_BASE")
            .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.api_base.trim_end_matches('/')
        )
    }
}

/// Gemini provider
///
/// Sends one prompt per call and returns the concatenated text parts of the
/// first candidate.
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider with custom configuration
    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new Gemini provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GeminiConfig::new(api_key))
    }

    /// Create a provider from environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(GeminiConfig::from_env()?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    #[instrument(
        skip(self, request),
        fields(model = %request.model, api_base = %self.config.api_base)
    )]
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        if self.config.api_key.trim().is_empty() {
            return Err(LLMError::ConfigurationError(
                "GEMINI_API_KEY is not configured".to_string(),
            ));
        }

        let endpoint = self.config.endpoint(&request.model);
        debug!("Sending request to Gemini API at {endpoint}");

        let gemini_request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt,
                }],
            }],
            generation_config: GeminiGenerationConfig {
                response_mime_type: request.response_mime_type,
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(endpoint)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await?;

        let status = response.status();
        let raw_text = response.text().await?;

        if !status.is_success() {
            let err = parse_error(&raw_text).unwrap_or_else(|| LLMError::UpstreamHttp {
                status: status.as_u16(),
                message: "Gemini API call failed".to_string(),
            });
            warn!(status = err.status(), "Gemini API returned an error: {err}");
            return Err(err);
        }

        let parsed: GeminiResponse =
            serde_json::from_str(&raw_text).map_err(|e| LLMError::InvalidJson(e.to_string()))?;

        let usage = parsed.usage_metadata.as_ref().map(|meta| TokenUsage {
            input_tokens: meta.prompt_token_count,
            output_tokens: meta.candidates_token_count,
        });

        let text = extract_text(parsed).ok_or(LLMError::EmptyTextResponse)?;

        match usage {
            Some(usage) => debug!(
                "Received response - tokens: {}/{}",
                usage.input_tokens, usage.output_tokens
            ),
            None => debug!("Received response without usage metadata"),
        }

        Ok(GenerationResponse { text, usage })
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

/// Interpret a Gemini error body, keeping the upstream status and message
fn parse_error(raw: &str) -> Option<LLMError> {
    let parsed: GeminiErrorResponse = serde_json::from_str(raw).ok()?;
    let error = parsed.error?;
    let status = error.code.filter(|code| *code > 0)?;
    let message = error.message.map(|m| m.trim().to_string()).filter(|m| !m.is_empty())?;

    Some(LLMError::UpstreamHttp { status, message })
}

/// Join the text parts of the first candidate; `None` when nothing is left after trimming
fn extract_text(response: GeminiResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let text: String = candidate
        .content?
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

// ============================================================================
// Gemini-specific request types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

// ============================================================================
// Gemini-specific response types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: Option<GeminiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    code: Option<u16>,
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_creation() {
        let provider = GeminiProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.config().api_key, "test-key");
        assert_eq!(provider.config().api_base, DEFAULT_GEMINI_API_BASE);
        assert_eq!(provider.config().timeout_secs, 30);
    }

    #[test]
    fn test_endpoint() {
        let config = GeminiConfig::new("k").with_api_base("http://localhost:9000/v1beta/");
        assert_eq!(
            config.endpoint("gemini-3-flash-preview"),
            "http://localhost:9000/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_request_serialization() {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: "hi".to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                response_mime_type: "text/plain".to_string(),
                temperature: None,
                max_output_tokens: None,
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{ "parts": [{ "text": "hi" }] }],
                "generationConfig": { "responseMimeType": "text/plain" }
            })
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "  Hello, " }, { "text": "world  " }] }
            }]
        }))
        .unwrap();

        assert_eq!(extract_text(response).as_deref(), Some("Hello, world"));
    }

    #[test]
    fn test_extract_text_empty() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        }))
        .unwrap();
        assert!(extract_text(response).is_none());

        let response: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        assert!(extract_text(response).is_none());
    }

    #[test]
    fn test_parse_error() {
        let body = r#"{"error":{"code":429,"message":" quota exceeded ","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = parse_error(body).unwrap();
        assert_eq!(err.status(), 429);
        assert_eq!(err.code(), "upstream_http_error");
        assert_eq!(err.to_string(), "quota exceeded");

        assert!(parse_error("not json").is_none());
        assert!(parse_error(r#"{"error":{"code":500}}"#).is_none());
        assert!(parse_error(r#"{"error":{"message":"missing code"}}"#).is_none());
    }
}
