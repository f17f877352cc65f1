//! Text generation provider layer for stock-judge
//!
//! This crate provides the abstraction the narrative pipeline talks to:
//!
//! - Request/response types for single-prompt text generation
//! - The [`TextGenerator`] trait
//! - [`LLMError`], which carries the HTTP status and machine-readable code
//!   surfaced to callers
//! - The Gemini `generateContent` provider

pub mod error;
pub mod generation;
pub mod provider;
pub mod providers;

// Re-export main types
pub use error::{LLMError, Result};
pub use generation::{GenerationRequest, GenerationRequestBuilder, GenerationResponse, TokenUsage};
pub use provider::TextGenerator;
