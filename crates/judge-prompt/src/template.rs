//! Core prompt template trait
//!
//! This module defines the [`PromptTemplate`] trait that all template implementations must follow.

use crate::{Language, PromptError, Result};

/// Core trait for prompt templates
///
/// Templates are rendered with `serde_json::Value` variables so the trait stays
/// dyn-compatible. When the requested language is missing, callers can use
/// [`PromptTemplate::render_with_fallback`].
pub trait PromptTemplate: Send + Sync {
    /// Get the template name/identifier
    fn name(&self) -> &str;

    /// Get available languages
    fn languages(&self) -> Vec<Language>;

    /// Check if a language is supported
    fn supports_language(&self, lang: &Language) -> bool {
        self.languages().contains(lang)
    }

    /// Render the template with variables for a specific language
    fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String>;

    /// Render with fallback to default language
    ///
    /// If the requested language is not available:
    /// 1. Try English as fallback
    /// 2. If English not available, use the first available language
    /// 3. If no languages available, return error
    fn render_with_fallback(&self, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        if self.supports_language(lang) {
            return self.render(lang, vars);
        }

        if self.supports_language(&Language::English) {
            return self.render(&Language::English, vars);
        }

        let fallback = self
            .languages()
            .into_iter()
            .next()
            .ok_or_else(|| PromptError::NoLanguageAvailable(self.name().to_string()))?;

        self.render(&fallback, vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    struct StaticTemplate {
        name: String,
        templates: HashMap<Language, String>,
    }

    impl StaticTemplate {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                templates: HashMap::new(),
            }
        }

        fn with_template(mut self, lang: Language, content: &str) -> Self {
            self.templates.insert(lang, content.to_string());
            self
        }
    }

    impl PromptTemplate for StaticTemplate {
        fn name(&self) -> &str {
            &self.name
        }

        fn languages(&self) -> Vec<Language> {
            self.templates.keys().cloned().collect()
        }

        fn render(&self, lang: &Language, _vars: &serde_json::Value) -> Result<String> {
            self.templates
                .get(lang)
                .cloned()
                .ok_or_else(|| PromptError::TemplateNotFound {
                    name: self.name.clone(),
                    language: lang.code().to_string(),
                })
        }
    }

    #[test]
    fn test_render_with_fallback_to_english() {
        let template = StaticTemplate::new("test")
            .with_template(Language::English, "Hello")
            .with_template(Language::Japanese, "こんにちは");

        let result = template
            .render_with_fallback(&Language::Other("de".to_string()), &json!({}))
            .unwrap();
        assert_eq!(result, "Hello");
    }

    #[test]
    fn test_render_with_fallback_to_first() {
        let template = StaticTemplate::new("test").with_template(Language::Japanese, "こんにちは");

        let result = template
            .render_with_fallback(&Language::English, &json!({}))
            .unwrap();
        assert_eq!(result, "こんにちは");
    }

    #[test]
    fn test_render_with_fallback_no_languages() {
        let template = StaticTemplate::new("test");
        let result = template.render_with_fallback(&Language::English, &json!({}));
        assert!(matches!(result, Err(PromptError::NoLanguageAvailable(_))));
    }
}
