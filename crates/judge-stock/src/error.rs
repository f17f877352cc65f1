//! Error types for screening operations

use judge_llm::LLMError;
use judge_prompt::PromptError;
use thiserror::Error;

/// Screening specific errors
///
/// Each variant maps to the HTTP status and stable code exposed by the server
/// (see [`StockError::status`] and [`StockError::code`]).
#[derive(Debug, Error)]
pub enum StockError {
    /// Required credential is not configured
    #[error("{0} is not set")]
    MissingApiKey(String),

    /// Financial data provider answered with a non-success status
    #[error("FMP API call failed: {endpoint}")]
    UpstreamHttp { endpoint: String },

    /// Transport failure talking to the financial data provider
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body was not JSON
    #[error("Failed to parse FMP response JSON: {endpoint}")]
    InvalidJson { endpoint: String },

    /// Response body was JSON but not an array of rows
    #[error("Unexpected FMP response shape: {endpoint}")]
    UnexpectedResponseShape { endpoint: String },

    /// A provider field is missing, not a finite number, or a blank string
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// Equity ratio cannot be derived from a zero asset base
    #[error("Cannot compute equityRatio: totalAssets is 0")]
    ZeroTotalAssets,

    /// Provider returned no rows
    #[error("No data found: {endpoint}")]
    DataNotFound { endpoint: String },

    /// Provider plan does not cover the request
    #[error("The current FMP plan does not cover this symbol")]
    PremiumLimited,

    /// Caller input rejected before any upstream call
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Text generation failed
    #[error(transparent)]
    Llm(#[from] LLMError),

    /// Prompt rendering failed
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl StockError {
    /// HTTP status this error should surface as
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingApiKey(_) | Self::ConfigError(_) | Self::Prompt(_) => 500,
            Self::UpstreamHttp { .. }
            | Self::NetworkError(_)
            | Self::InvalidJson { .. }
            | Self::UnexpectedResponseShape { .. } => 502,
            Self::InvalidField(_)
            | Self::ZeroTotalAssets
            | Self::DataNotFound { .. }
            | Self::PremiumLimited => 422,
            Self::BadRequest(_) => 400,
            Self::Llm(err) => err.status(),
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingApiKey(_) => "missing_api_key",
            Self::UpstreamHttp { .. } => "upstream_http_error",
            Self::NetworkError(_) => "network_error",
            Self::InvalidJson { .. } => "invalid_json",
            Self::UnexpectedResponseShape { .. } => "unexpected_response_shape",
            Self::InvalidField(_) | Self::ZeroTotalAssets => "invalid_field",
            Self::DataNotFound { .. } => "data_not_found",
            Self::PremiumLimited => "premium_limited",
            Self::BadRequest(_) => "bad_request",
            Self::ConfigError(_) => "config_error",
            Self::Llm(err) => err.code(),
            Self::Prompt(_) => "prompt_error",
        }
    }
}

/// Result type alias for screening operations
pub type Result<T> = std::result::Result<T, StockError>;
