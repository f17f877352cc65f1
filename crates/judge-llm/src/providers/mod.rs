//! Concrete text generation providers

pub mod gemini;

pub use gemini::{GeminiConfig, GeminiProvider};
