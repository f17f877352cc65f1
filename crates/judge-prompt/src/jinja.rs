//! MiniJinja-based template implementation

use crate::{Language, PromptError, PromptTemplate, Result};
use minijinja::Environment;
use std::collections::HashMap;

/// A prompt template backed by MiniJinja
///
/// Block tags (`{% for %}`, `{% if %}`) do not leave blank lines behind, so
/// multi-line prompts read the same as their source.
///
/// # Examples
///
/// ```
/// use judge_prompt::{JinjaTemplate, Language, PromptTemplate};
/// use serde_json::json;
///
/// let template = JinjaTemplate::bilingual(
///     "greeting",
///     "Hello, {{ name }}!",
///     "こんにちは、{{ name }}さん！",
/// ).unwrap();
///
/// let en = template.render(&Language::English, &json!({ "name": "Ada" })).unwrap();
/// assert_eq!(en, "Hello, Ada!");
/// ```
pub struct JinjaTemplate {
    name: String,
    templates: HashMap<Language, String>,
}

impl JinjaTemplate {
    /// Create a new template builder
    pub fn builder(name: impl Into<String>) -> JinjaTemplateBuilder {
        JinjaTemplateBuilder::new(name)
    }

    /// Create with English and Japanese templates
    pub fn bilingual(
        name: impl Into<String>,
        english: impl Into<String>,
        japanese: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(name)
            .english(english)
            .japanese(japanese)
            .build()
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env
}

impl PromptTemplate for JinjaTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn languages(&self) -> Vec<Language> {
        self.templates.keys().cloned().collect()
    }

    fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        let template_str =
            self.templates
                .get(lang)
                .ok_or_else(|| PromptError::TemplateNotFound {
                    name: self.name.clone(),
                    language: lang.code().to_string(),
                })?;

        let env = environment();
        let value = minijinja::Value::from_serialize(vars);

        env.render_str(template_str, value)
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .field("languages", &self.templates.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`JinjaTemplate`]
pub struct JinjaTemplateBuilder {
    name: String,
    templates: HashMap<Language, String>,
}

impl JinjaTemplateBuilder {
    /// Create a new builder with the given template name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            templates: HashMap::new(),
        }
    }

    fn template(mut self, lang: Language, content: impl Into<String>) -> Self {
        self.templates.insert(lang, content.into());
        self
    }

    /// Add English template
    pub fn english(self, content: impl Into<String>) -> Self {
        self.template(Language::English, content)
    }

    /// Add Japanese template
    pub fn japanese(self, content: impl Into<String>) -> Self {
        self.template(Language::Japanese, content)
    }

    /// Build the template
    ///
    /// Fails when no template was given or when any variant does not parse.
    pub fn build(self) -> Result<JinjaTemplate> {
        if self.templates.is_empty() {
            return Err(PromptError::NoTemplatesProvided(self.name));
        }

        let env = environment();
        for (lang, content) in &self.templates {
            env.template_from_str(content)
                .map_err(|e| PromptError::TemplateParseFailed {
                    name: self.name.clone(),
                    language: lang.code().to_string(),
                    detail: e.to_string(),
                })?;
        }

        Ok(JinjaTemplate {
            name: self.name,
            templates: self.templates,
        })
    }
}
