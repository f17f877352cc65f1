//! Financial data sources

pub mod fmp;

pub use fmp::FmpClient;

use crate::error::Result;
use crate::model::{Company, FinancialMetrics};
use async_trait::async_trait;

/// Source of company search results and normalized metrics
///
/// The session and the HTTP server depend on this trait rather than on a
/// concrete client.
#[async_trait]
pub trait FinancialDataSource: Send + Sync {
    /// Search listed companies by name
    async fn search_companies(&self, query: &str) -> Result<Vec<Company>>;

    /// Find the listed company with exactly this ticker
    ///
    /// Falls back to a name search filtered by exact symbol; sources with a
    /// dedicated symbol endpoint override it.
    async fn lookup_symbol(&self, symbol: &str) -> Result<Option<Company>> {
        let symbol = symbol.trim().to_uppercase();
        Ok(self
            .search_companies(&symbol)
            .await?
            .into_iter()
            .find(|company| company.symbol == symbol))
    }

    /// Fetch and normalize the seven metrics for a symbol
    async fn fetch_financial_metrics(&self, symbol: &str) -> Result<FinancialMetrics>;
}
