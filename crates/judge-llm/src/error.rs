//! Error types for text generation

use thiserror::Error;

/// Result type for text generation
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur while generating text
///
/// Every variant maps to an HTTP status and a stable snake_case code through
/// [`LLMError::status`] and [`LLMError::code`].
#[derive(Error, Debug)]
pub enum LLMError {
    /// Credential or provider configuration missing
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Upstream answered with a non-success status
    #[error("{message}")]
    UpstreamHttp { status: u16, message: String },

    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("Failed to parse response JSON: {0}")]
    InvalidJson(String),

    /// Response carried no text
    #[error("No text in generation response")]
    EmptyTextResponse,
}

impl LLMError {
    /// HTTP status this error should surface as
    pub fn status(&self) -> u16 {
        match self {
            Self::ConfigurationError(_) => 500,
            Self::UpstreamHttp { status, .. } => *status,
            Self::HttpError(_) | Self::InvalidJson(_) | Self::EmptyTextResponse => 502,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigurationError(_) => "missing_api_key",
            Self::UpstreamHttp { .. } => "upstream_http_error",
            Self::HttpError(_) => "network_error",
            Self::InvalidJson(_) => "invalid_json",
            Self::EmptyTextResponse => "empty_text_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code() {
        let err = LLMError::ConfigurationError("GEMINI_API_KEY not set".to_string());
        assert_eq!(err.status(), 500);
        assert_eq!(err.code(), "missing_api_key");

        let err = LLMError::UpstreamHttp {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        };
        assert_eq!(err.status(), 429);
        assert_eq!(err.code(), "upstream_http_error");
        assert_eq!(err.to_string(), "Resource has been exhausted");

        let err = LLMError::InvalidJson("expected value".to_string());
        assert_eq!(err.status(), 502);
        assert_eq!(err.code(), "invalid_json");

        let err = LLMError::EmptyTextResponse;
        assert_eq!(err.status(), 502);
        assert_eq!(err.code(), "empty_text_response");
    }
}
