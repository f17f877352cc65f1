//! Two-stage narrative generation
//!
//! Stage 1 produces a macro-environment analysis; stage 2 turns the screening
//! result plus that analysis into an investment commentary. The stages run
//! strictly in sequence and a failure in either aborts the whole narrative.

use crate::config::StockConfig;
use crate::error::Result;
use crate::model::{InvestmentResult, Narrative};
use crate::prompts::{build_investment_commentary_prompt, build_meta_analysis_prompt};
use judge_llm::providers::gemini::DEFAULT_GEMINI_MODEL;
use judge_llm::{GenerationRequest, LLMError, TextGenerator};
use judge_prompt::Language;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Generates the two narrative texts for a screening result
#[derive(Clone)]
pub struct NarrativeGenerator {
    generator: Arc<dyn TextGenerator>,
    model: String,
    language: Language,
}

impl NarrativeGenerator {
    /// Create a generator with the default model and Japanese output
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            language: Language::Japanese,
        }
    }

    /// Create a generator using the model and language from configuration
    pub fn from_config(generator: Arc<dyn TextGenerator>, config: &StockConfig) -> Self {
        Self::new(generator)
            .with_model(config.model.clone())
            .with_language(config.response_language.clone())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Stage 1: macro-environment analysis for the result's company
    pub async fn meta_analysis(&self, result: &InvestmentResult) -> Result<String> {
        let prompt = build_meta_analysis_prompt(&result.company.name, &self.language)?;
        self.complete(prompt).await
    }

    /// Stage 2: investment commentary built on the stage-1 text
    pub async fn commentary(
        &self,
        result: &InvestmentResult,
        meta_analysis_text: &str,
    ) -> Result<String> {
        let prompt =
            build_investment_commentary_prompt(result, meta_analysis_text, &self.language)?;
        self.complete(prompt).await
    }

    /// Run both stages
    #[instrument(skip(self, result), fields(symbol = %result.company.symbol, model = %self.model))]
    pub async fn generate(&self, result: &InvestmentResult) -> Result<Narrative> {
        let meta_analysis_text = self.meta_analysis(result).await?;
        debug!("Meta analysis received ({} chars)", meta_analysis_text.len());

        let investment_commentary_text = self.commentary(result, &meta_analysis_text).await?;
        info!("Narrative generated");

        Ok(Narrative {
            meta_analysis_text,
            investment_commentary_text,
        })
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let request = GenerationRequest::builder(&self.model, prompt).build();
        let response = self.generator.generate(request).await?;

        let text = response.text.trim();
        if text.is_empty() {
            return Err(LLMError::EmptyTextResponse.into());
        }
        Ok(text.to_string())
    }
}

impl std::fmt::Debug for NarrativeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeGenerator")
            .field("provider", &self.generator.name())
            .field("model", &self.model)
            .field("language", &self.language)
            .finish()
    }
}
