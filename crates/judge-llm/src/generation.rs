//! Generation request and response types

use serde::{Deserialize, Serialize};

/// Plain-text output, the only mime type the narrative pipeline requests
pub const TEXT_PLAIN: &str = "text/plain";

/// Request for a single-prompt text generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// Prompt text sent as the only user part
    pub prompt: String,

    /// Requested response mime type
    pub response_mime_type: String,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Response from a text generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text, trimmed
    pub text: String,

    /// Token usage statistics, when the provider reports them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens
    pub input_tokens: u32,

    /// Number of output tokens
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

impl GenerationRequest {
    /// Create a builder for generation requests
    pub fn builder(
        model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> GenerationRequestBuilder {
        GenerationRequestBuilder::new(model, prompt)
    }
}

/// Builder for GenerationRequest
pub struct GenerationRequestBuilder {
    model: String,
    prompt: String,
    response_mime_type: String,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

impl GenerationRequestBuilder {
    /// Create a new builder
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            response_mime_type: TEXT_PLAIN.to_string(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Set the response mime type
    pub fn response_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.response_mime_type = mime_type.into();
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum output tokens
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Build the generation request
    pub fn build(self) -> GenerationRequest {
        GenerationRequest {
            model: self.model,
            prompt: self.prompt,
            response_mime_type: self.response_mime_type,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = GenerationRequest::builder("gemini-3-flash-preview", "Hello")
            .temperature(0.7)
            .max_output_tokens(2048)
            .build();

        assert_eq!(request.model, "gemini-3-flash-preview");
        assert_eq!(request.prompt, "Hello");
        assert_eq!(request.response_mime_type, "text/plain");
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_output_tokens, Some(2048));
    }

    #[test]
    fn test_builder_defaults() {
        let request = GenerationRequest::builder("m", "p").build();
        assert_eq!(request.response_mime_type, TEXT_PLAIN);
        assert!(request.temperature.is_none());
        assert!(request.max_output_tokens.is_none());
    }

    #[test]
    fn test_token_usage() {
        let usage = TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        };
        assert_eq!(usage.total(), 150);
    }
}
