//! Prompt template management for stock-judge
//!
//! Templates are written in Jinja2 syntax (rendered by MiniJinja) and can carry
//! one variant per [`Language`]. Rendering takes `serde_json::Value` variables.
//!
//! ```
//! use judge_prompt::{JinjaTemplate, Language, PromptTemplate};
//! use serde_json::json;
//!
//! let template = JinjaTemplate::bilingual(
//!     "analyzer",
//!     "Analyze {{ symbol }}",
//!     "{{ symbol }} を分析してください",
//! ).unwrap();
//!
//! let prompt = template.render(&Language::Japanese, &json!({ "symbol": "KO" })).unwrap();
//! assert_eq!(prompt, "KO を分析してください");
//! ```

mod error;
mod jinja;
mod language;
mod template;

pub use error::{PromptError, Result};
pub use jinja::{JinjaTemplate, JinjaTemplateBuilder};
pub use language::Language;
pub use template::PromptTemplate;
