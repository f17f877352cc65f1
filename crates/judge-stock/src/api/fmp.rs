//! Financial Modeling Prep API client
//!
//! Uses the "stable" REST API. Every endpoint returns a JSON array; only row
//! zero is used for metrics.

use super::FinancialDataSource;
use crate::config::StockConfig;
use crate::error::{Result, StockError};
use crate::model::{Company, FinancialMetrics};
use crate::normalize::{
    BalanceSheetRow, GrowthRow, RatiosTtmRow, SearchNameRow, company_from_row, normalize_metrics,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const PREMIUM_MARKER: &str = "Premium Query Parameter";
const MIN_QUERY_CHARS: usize = 2;

/// Financial Modeling Prep API client
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
    base_url: String,
    search_limit: u32,
    supported_exchanges: Vec<String>,
}

impl FmpClient {
    /// Create a client with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let config = StockConfig {
            fmp_api_key: Some(api_key.into()),
            ..StockConfig::default()
        };
        Self::from_config(&config)
    }

    /// Create a client from configuration; fails when `FMP_API_KEY` is missing
    pub fn from_config(config: &StockConfig) -> Result<Self> {
        let api_key = config.require_fmp_key()?.to_string();
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.fmp_base_url.clone(),
            search_limit: config.search_limit,
            supported_exchanges: config.supported_exchanges.clone(),
        })
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Base URL in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Decode search rows one by one, applying the exchange allow-list and
    /// keeping the first row per symbol
    fn companies_from_rows(&self, rows: &[Value]) -> Vec<Company> {
        let mut seen = HashSet::new();
        let mut companies = Vec::new();

        for row in rows {
            let Ok(row) = SearchNameRow::deserialize(row) else {
                continue;
            };
            let Ok(company) = company_from_row(&row) else {
                continue;
            };
            if !self.supported_exchanges.contains(&company.exchange) {
                continue;
            }
            if seen.insert(company.symbol.clone()) {
                companies.push(company);
            }
        }

        companies
    }

    /// GET an endpoint and decode its body as an array of rows
    async fn fetch_array<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        if self.api_key.trim().is_empty() {
            return Err(StockError::MissingApiKey("FMP_API_KEY".to_string()));
        }

        let url = format!("{}/{endpoint}", self.base_url.trim_end_matches('/'));
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%status, endpoint, "FMP API returned an error");
            return Err(StockError::UpstreamHttp {
                endpoint: endpoint.to_string(),
            });
        }

        if body.contains(PREMIUM_MARKER) {
            warn!(endpoint, "FMP plan does not cover this request");
            return Err(StockError::PremiumLimited);
        }

        let parsed: serde_json::Value =
            serde_json::from_str(&body).map_err(|_| StockError::InvalidJson {
                endpoint: endpoint.to_string(),
            })?;

        if !parsed.is_array() {
            return Err(StockError::UnexpectedResponseShape {
                endpoint: endpoint.to_string(),
            });
        }

        serde_json::from_value(parsed).map_err(|_| StockError::UnexpectedResponseShape {
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl FinancialDataSource for FmpClient {
    /// Search companies, keeping supported exchanges and one row per symbol
    ///
    /// Queries shorter than two characters (after trimming) return an empty
    /// list without calling upstream. Rows that are not objects or lack an
    /// identity field are skipped.
    #[instrument(skip(self))]
    async fn search_companies(&self, query: &str) -> Result<Vec<Company>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let limit = self.search_limit.to_string();
        let params = [("query", query), ("limit", limit.as_str())];
        let rows: Vec<Value> = self.fetch_array("search-name", &params).await?;

        let companies = self.companies_from_rows(&rows);
        debug!("{} of {} rows kept", companies.len(), rows.len());
        Ok(companies)
    }

    /// Resolve an exact ticker through `search-symbol`
    ///
    /// Single-letter tickers are looked up too.
    #[instrument(skip(self))]
    async fn lookup_symbol(&self, symbol: &str) -> Result<Option<Company>> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(StockError::BadRequest("symbol is required".to_string()));
        }

        let limit = self.search_limit.to_string();
        let params = [("query", symbol.as_str()), ("limit", limit.as_str())];
        let rows: Vec<Value> = self.fetch_array("search-symbol", &params).await?;

        Ok(self
            .companies_from_rows(&rows)
            .into_iter()
            .find(|company| company.symbol == symbol))
    }

    /// Fetch the three sources concurrently and normalize them
    #[instrument(skip(self))]
    async fn fetch_financial_metrics(&self, symbol: &str) -> Result<FinancialMetrics> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(StockError::BadRequest("symbol is required".to_string()));
        }

        let by_symbol = [("symbol", symbol)];
        let latest = [("symbol", symbol), ("limit", "1")];

        let (ratios, growth, balance) = tokio::try_join!(
            self.fetch_array::<RatiosTtmRow>("ratios-ttm", &by_symbol),
            self.fetch_array::<GrowthRow>("financial-growth", &by_symbol),
            self.fetch_array::<BalanceSheetRow>("balance-sheet-statement", &latest),
        )?;

        normalize_metrics(&ratios, &growth, &balance)
    }
}
