//! Seven-metric stock screening
//!
//! This crate turns a listed company into an investment verdict:
//!
//! - Company search and financial data from Financial Modeling Prep
//! - Normalization of raw provider rows into [`FinancialMetrics`]
//! - A fixed rule table that scores seven metrics and yields a [`Verdict`]
//! - A two-stage AI narrative (macro-environment analysis, then investment
//!   commentary) generated through any [`judge_llm::TextGenerator`]
//! - A screening session that discards results superseded by newer requests
//!
//! # Example
//!
//! ```
//! use judge_stock::{Company, FinancialMetrics, Verdict, evaluate};
//!
//! let company = Company::new("KO", "The Coca-Cola Company", "NYSE", "USD");
//! let metrics = FinancialMetrics {
//!     equity_ratio: Some(38.5),
//!     revenue_growth: Some(8.2),
//!     net_income_growth: Some(12.5),
//!     payout_ratio: Some(33.0),
//!     dividend_yield: Some(3.2),
//!     per: Some(10.5),
//!     pbr: Some(1.1),
//! };
//!
//! let result = evaluate(&company, metrics);
//! assert_eq!(result.score, 7);
//! assert_eq!(result.verdict, Verdict::Excellent);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod model;
pub mod narrative;
pub mod normalize;
pub mod prompts;
pub mod session;

// Re-export main types for convenience
pub use api::{FinancialDataSource, FmpClient};
pub use config::StockConfig;
pub use error::{Result, StockError};
pub use evaluate::{MetricRule, RULES, evaluate, evaluate_localized};
pub use model::{
    Company, FinancialMetrics, InvestmentResult, MetricEvaluation, MetricKey, Narrative, Verdict,
};
pub use narrative::NarrativeGenerator;
pub use normalize::normalize_metrics;
pub use session::{Outcome, RequestGeneration, ScreeningSession, SessionState, Ticket};

// Re-export Language from judge-prompt
pub use judge_prompt::Language;
