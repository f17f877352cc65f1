//! Language support for prompt templates
//!
//! Prompts and display labels exist in Japanese and English; anything else is
//! carried through `Other` and resolved by fallback at render time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported languages for prompts
///
/// # Examples
///
/// ```
/// use judge_prompt::Language;
///
/// let lang = Language::Japanese;
/// assert_eq!(lang.code(), "ja");
/// assert_eq!(lang.name(), "Japanese");
///
/// assert_eq!(Language::from_code("en"), Language::English);
/// assert_eq!(Language::from_code("fr"), Language::Other("fr".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// English
    #[default]
    English,
    /// Japanese
    Japanese,
    /// Other languages (ISO 639-1 code)
    Other(String),
}

impl Language {
    /// Get ISO 639-1 language code
    pub fn code(&self) -> &str {
        match self {
            Language::English => "en",
            Language::Japanese => "ja",
            Language::Other(code) => code,
        }
    }

    /// Get language name for display
    pub fn name(&self) -> &str {
        match self {
            Language::English => "English",
            Language::Japanese => "Japanese",
            Language::Other(code) => code,
        }
    }

    /// Parse from ISO 639-1 code or common name
    pub fn from_code(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" | "en-us" | "en-gb" => Language::English,
            "ja" | "japanese" | "日本語" | "ja-jp" | "jp" => Language::Japanese,
            other => Language::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
