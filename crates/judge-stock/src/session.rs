//! Screening session with stale-result protection
//!
//! A session tracks the selected company, its evaluation, and its narrative.
//! Every selection, evaluation, and narrative run takes a fresh [`Ticket`] from
//! the session's [`RequestGeneration`]; after each await point the ticket is
//! compared with the latest one issued and the work is dropped if it has been
//! superseded.

use crate::api::FinancialDataSource;
use crate::error::{Result, StockError};
use crate::evaluate::evaluate_localized;
use crate::model::{Company, InvestmentResult, Narrative};
use crate::narrative::NarrativeGenerator;
use judge_prompt::Language;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Monotonic request counter shared by all clones of a session
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration(Arc<AtomicU64>);

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, invalidating every earlier one
    pub fn issue(&self) -> Ticket {
        Ticket(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the latest issued
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0.load(Ordering::SeqCst) == ticket.0
    }
}

/// Result of a guarded operation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The operation finished and its result was applied
    Current(T),
    /// A newer request superseded this one; nothing was applied
    Stale,
}

impl<T> Outcome<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Outcome::Stale)
    }

    pub fn into_current(self) -> Option<T> {
        match self {
            Outcome::Current(value) => Some(value),
            Outcome::Stale => None,
        }
    }
}

/// Observable session state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub selected: Option<Company>,
    pub result: Option<InvestmentResult>,
    pub narrative: Option<Narrative>,
    pub evaluating: bool,
    pub narrating: bool,
    pub error: Option<String>,
}

/// A single user's screening flow: select, evaluate, narrate
///
/// Cloning is cheap; clones share state and the request generation, so a
/// narrative running on a spawned clone is invalidated by a selection made
/// through any other handle.
#[derive(Clone)]
pub struct ScreeningSession {
    source: Arc<dyn FinancialDataSource>,
    narrator: Option<NarrativeGenerator>,
    language: Language,
    generation: RequestGeneration,
    state: Arc<Mutex<SessionState>>,
}

impl ScreeningSession {
    pub fn new(source: Arc<dyn FinancialDataSource>) -> Self {
        Self {
            source,
            narrator: None,
            language: Language::Japanese,
            generation: RequestGeneration::new(),
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    /// Enable narrative generation
    pub fn with_narrator(mut self, narrator: NarrativeGenerator) -> Self {
        self.narrator = Some(narrator);
        self
    }

    /// Language for evaluation labels
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn has_narrator(&self) -> bool {
        self.narrator.is_some()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Search companies through the data source
    pub async fn search(&self, query: &str) -> Result<Vec<Company>> {
        self.source.search_companies(query).await
    }

    /// Resolve a ticker and select the company it names
    pub async fn select_symbol(&self, symbol: &str) -> Result<Company> {
        let company = self
            .source
            .lookup_symbol(symbol)
            .await?
            .ok_or_else(|| {
                StockError::BadRequest(format!("no listed company with symbol {}", symbol.trim()))
            })?;
        self.select(Some(company.clone()));
        Ok(company)
    }

    /// Select a company (or clear the selection)
    ///
    /// Clears the previous result, narrative and error and invalidates any
    /// in-flight evaluation or narrative.
    pub fn select(&self, company: Option<Company>) {
        self.generation.issue();
        let mut state = self.lock();
        *state = SessionState {
            selected: company,
            ..SessionState::default()
        };
    }

    /// Fetch metrics for the selected company and evaluate them
    pub async fn evaluate(&self) -> Result<Outcome<InvestmentResult>> {
        let company = self
            .lock()
            .selected
            .clone()
            .ok_or_else(|| StockError::BadRequest("no company selected".to_string()))?;

        let ticket = self.generation.issue();
        {
            let mut state = self.lock();
            state.evaluating = true;
            state.error = None;
            state.narrative = None;
            state.narrating = false;
        }

        let fetched = self.source.fetch_financial_metrics(&company.symbol).await;

        if !self.generation.is_current(ticket) {
            debug!(symbol = %company.symbol, "Discarding stale evaluation");
            return Ok(Outcome::Stale);
        }

        let mut state = self.lock();
        state.evaluating = false;
        match fetched {
            Ok(metrics) => {
                let result = evaluate_localized(&company, metrics, &self.language);
                info!(
                    symbol = %company.symbol,
                    score = result.score,
                    verdict = %result.verdict,
                    "Evaluation complete"
                );
                state.result = Some(result.clone());
                Ok(Outcome::Current(result))
            }
            Err(err) => {
                warn!(symbol = %company.symbol, code = err.code(), "Evaluation failed: {err}");
                state.result = None;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Generate the narrative for the current result
    ///
    /// Each stage is checked against the request generation; once superseded
    /// no further stage starts and nothing is written to the session.
    pub async fn generate_narrative(&self) -> Result<Outcome<Narrative>> {
        let narrator = self.narrator.clone().ok_or_else(|| {
            StockError::ConfigError("narrative generation is disabled".to_string())
        })?;

        let result = self
            .lock()
            .result
            .clone()
            .ok_or_else(|| StockError::BadRequest("no evaluation result".to_string()))?;

        let ticket = self.generation.issue();
        {
            let mut state = self.lock();
            state.narrative = None;
            state.narrating = true;
        }

        let narrative = self.run_stages(&narrator, &result, ticket).await;

        if !self.generation.is_current(ticket) {
            debug!(symbol = %result.company.symbol, "Discarding stale narrative");
            return Ok(Outcome::Stale);
        }

        let mut state = self.lock();
        state.narrating = false;
        match narrative {
            Ok(Some(narrative)) => {
                state.narrative = Some(narrative.clone());
                Ok(Outcome::Current(narrative))
            }
            Ok(None) => Ok(Outcome::Stale),
            Err(err) => {
                warn!(code = err.code(), "Narrative failed: {err}");
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// `Ok(None)` when superseded between stages
    async fn run_stages(
        &self,
        narrator: &NarrativeGenerator,
        result: &InvestmentResult,
        ticket: Ticket,
    ) -> Result<Option<Narrative>> {
        let meta_analysis_text = narrator.meta_analysis(result).await?;
        if !self.generation.is_current(ticket) {
            return Ok(None);
        }

        let investment_commentary_text = narrator.commentary(result, &meta_analysis_text).await?;
        Ok(Some(Narrative {
            meta_analysis_text,
            investment_commentary_text,
        }))
    }
}

impl std::fmt::Debug for ScreeningSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreeningSession")
            .field("narrator", &self.narrator)
            .field("language", &self.language)
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}
