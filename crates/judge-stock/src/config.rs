//! Configuration for screening operations

use crate::error::{Result, StockError};
use judge_llm::providers::gemini::{DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL};
use judge_prompt::Language;
use std::time::Duration;

/// Default Financial Modeling Prep base URL
pub const DEFAULT_FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Configuration for screening operations
///
/// Credentials are resolved once at startup and injected into the clients.
#[derive(Debug, Clone)]
pub struct StockConfig {
    /// Financial Modeling Prep API key
    pub fmp_api_key: Option<String>,

    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Financial Modeling Prep base URL
    pub fmp_base_url: String,

    /// Gemini REST base URL
    pub gemini_api_base: String,

    /// Model used for both narrative stages
    pub model: String,

    /// Language of labels and prompts
    pub response_language: Language,

    /// Request timeout for upstream HTTP calls
    pub request_timeout: Duration,

    /// Maximum rows requested from company search
    pub search_limit: u32,

    /// Exchanges kept in search results
    pub supported_exchanges: Vec<String>,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            fmp_api_key: None,
            gemini_api_key: None,
            fmp_base_url: DEFAULT_FMP_BASE_URL.to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            response_language: Language::Japanese,
            request_timeout: Duration::from_secs(30),
            search_limit: 30,
            supported_exchanges: vec!["NYSE".to_string(), "NASDAQ".to_string(), "AMEX".to_string()],
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Load API keys and optional overrides from environment
    ///
    /// Reads `FMP_API_KEY`, `GEMINI_API_KEY`, `GEMINI_MODEL`, `FMP_BASE_URL`,
    /// `GEMINI_API_BASE` and `RESPONSE_LANGUAGE`. Blank values are ignored.
    pub fn with_env_api_keys(mut self) -> Self {
        if let Some(key) = env_value("FMP_API_KEY") {
            self.fmp_api_key = Some(key);
        }
        if let Some(key) = env_value("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        if let Some(model) = env_value("GEMINI_MODEL") {
            self.model = model;
        }
        if let Some(url) = env_value("FMP_BASE_URL") {
            self.fmp_base_url = url;
        }
        if let Some(url) = env_value("GEMINI_API_BASE") {
            self.gemini_api_base = url;
        }
        if let Some(lang) = env_value("RESPONSE_LANGUAGE") {
            self.response_language = Language::from_code(&lang);
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(StockError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.search_limit == 0 {
            return Err(StockError::ConfigError(
                "search_limit must be greater than 0".to_string(),
            ));
        }

        if self.supported_exchanges.is_empty() {
            return Err(StockError::ConfigError(
                "supported_exchanges must not be empty".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(StockError::ConfigError("model must not be empty".to_string()));
        }

        Ok(())
    }

    /// FMP API key, or `missing_api_key`
    pub fn require_fmp_key(&self) -> Result<&str> {
        self.fmp_api_key
            .as_deref()
            .ok_or_else(|| StockError::MissingApiKey("FMP_API_KEY".to_string()))
    }

    /// Gemini API key, or `missing_api_key`
    pub fn require_gemini_key(&self) -> Result<&str> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| StockError::MissingApiKey("GEMINI_API_KEY".to_string()))
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    fmp_api_key: Option<String>,
    gemini_api_key: Option<String>,
    fmp_base_url: Option<String>,
    gemini_api_base: Option<String>,
    model: Option<String>,
    response_language: Option<Language>,
    request_timeout: Option<Duration>,
    search_limit: Option<u32>,
    supported_exchanges: Option<Vec<String>>,
}

impl StockConfigBuilder {
    /// Set FMP API key
    pub fn fmp_api_key(mut self, key: impl Into<String>) -> Self {
        self.fmp_api_key = Some(key.into());
        self
    }

    /// Set Gemini API key
    pub fn gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    /// Set FMP base URL
    pub fn fmp_base_url(mut self, url: impl Into<String>) -> Self {
        self.fmp_base_url = Some(url.into());
        self
    }

    /// Set Gemini base URL
    pub fn gemini_api_base(mut self, url: impl Into<String>) -> Self {
        self.gemini_api_base = Some(url.into());
        self
    }

    /// Set the generation model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the response language
    pub fn response_language(mut self, lang: Language) -> Self {
        self.response_language = Some(lang);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set search row limit
    pub fn search_limit(mut self, limit: u32) -> Self {
        self.search_limit = Some(limit);
        self
    }

    /// Set supported exchanges
    pub fn supported_exchanges(mut self, exchanges: Vec<String>) -> Self {
        self.supported_exchanges = Some(exchanges);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            fmp_api_key: self.fmp_api_key,
            gemini_api_key: self.gemini_api_key,
            fmp_base_url: self.fmp_base_url.unwrap_or(defaults.fmp_base_url),
            gemini_api_base: self.gemini_api_base.unwrap_or(defaults.gemini_api_base),
            model: self.model.unwrap_or(defaults.model),
            response_language: self.response_language.unwrap_or(defaults.response_language),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            search_limit: self.search_limit.unwrap_or(defaults.search_limit),
            supported_exchanges: self
                .supported_exchanges
                .unwrap_or(defaults.supported_exchanges),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StockConfig::default();
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert_eq!(config.response_language, Language::Japanese);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.search_limit, 30);
        assert_eq!(config.supported_exchanges, vec!["NYSE", "NASDAQ", "AMEX"]);
        assert_eq!(config.fmp_base_url, DEFAULT_FMP_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = StockConfig::builder()
            .fmp_api_key("fmp")
            .gemini_api_key("gem")
            .model("gemini-2.5-flash")
            .response_language(Language::English)
            .request_timeout(Duration::from_secs(10))
            .search_limit(10)
            .build()
            .unwrap();

        assert_eq!(config.require_fmp_key().unwrap(), "fmp");
        assert_eq!(config.require_gemini_key().unwrap(), "gem");
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.response_language, Language::English);
        assert_eq!(config.search_limit, 10);
    }

    #[test]
    fn test_validation() {
        assert!(StockConfig::builder().search_limit(0).build().is_err());
        assert!(
            StockConfig::builder()
                .request_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
        assert!(
            StockConfig::builder()
                .supported_exchanges(Vec::new())
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_missing_keys() {
        let config = StockConfig::default();

        let err = config.require_fmp_key().unwrap_err();
        assert_eq!(err.code(), "missing_api_key");
        assert_eq!(err.status(), 500);
        assert_eq!(err.to_string(), "FMP_API_KEY is not set");

        let err = config.require_gemini_key().unwrap_err();
        assert_eq!(err.to_string(), "GEMINI_API_KEY is not set");
    }
}
