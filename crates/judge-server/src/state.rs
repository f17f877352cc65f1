//! Shared handler state

use judge_llm::providers::{GeminiConfig, GeminiProvider};
use judge_stock::{FinancialDataSource, FmpClient, Language, NarrativeGenerator, StockConfig};
use std::sync::Arc;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn FinancialDataSource>,
    pub narrator: NarrativeGenerator,
    pub language: Language,
}

impl AppState {
    pub fn new(source: Arc<dyn FinancialDataSource>, narrator: NarrativeGenerator) -> Self {
        let language = narrator.language().clone();
        Self {
            source,
            narrator,
            language,
        }
    }

    /// Build production clients; fails when either API key is missing
    pub fn from_config(config: &StockConfig) -> judge_stock::Result<Self> {
        config.validate()?;

        let source = FmpClient::from_config(config)?;

        let gemini = GeminiConfig::new(config.require_gemini_key()?)
            .with_api_base(config.gemini_api_base.clone())
            .with_timeout(config.request_timeout.as_secs().max(1));
        let provider = GeminiProvider::with_config(gemini)?;
        let narrator = NarrativeGenerator::from_config(Arc::new(provider), config);

        Ok(Self::new(Arc::new(source), narrator))
    }
}
