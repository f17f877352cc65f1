//! Text generator trait definition

use crate::{GenerationRequest, GenerationResponse, Result};
use async_trait::async_trait;

/// Trait for text generation providers
///
/// Implementations send a single prompt to a hosted model and return the
/// generated text. The narrative pipeline only depends on this trait, so tests
/// can substitute a mock.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a single prompt
    ///
    /// # Arguments
    ///
    /// * `request` - The prompt, model, and generation parameters
    ///
    /// # Returns
    ///
    /// The generated text (trimmed, never empty) and optional token usage
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse>;

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;
}
