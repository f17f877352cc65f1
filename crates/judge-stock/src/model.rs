//! Domain types shared by the normalizer, engine, and narrative pipeline
//!
//! All types serialize to camelCase JSON. Unknown metric values are `None`
//! and serialize as `null`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A listed company as returned by company search
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Company {
    /// Ticker symbol, unique key
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Listing exchange (NYSE, NASDAQ, AMEX)
    pub exchange: String,
    /// Trading currency
    pub currency: String,
}

impl Company {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: exchange.into(),
            currency: currency.into(),
        }
    }
}

/// Identifies one of the seven screened metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    EquityRatio,
    RevenueGrowth,
    NetIncomeGrowth,
    PayoutRatio,
    DividendYield,
    Per,
    Pbr,
}

impl MetricKey {
    /// All keys in rule-table order
    pub const ALL: [MetricKey; 7] = [
        MetricKey::EquityRatio,
        MetricKey::RevenueGrowth,
        MetricKey::NetIncomeGrowth,
        MetricKey::PayoutRatio,
        MetricKey::DividendYield,
        MetricKey::Per,
        MetricKey::Pbr,
    ];

    /// Wire name (camelCase)
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::EquityRatio => "equityRatio",
            MetricKey::RevenueGrowth => "revenueGrowth",
            MetricKey::NetIncomeGrowth => "netIncomeGrowth",
            MetricKey::PayoutRatio => "payoutRatio",
            MetricKey::DividendYield => "dividendYield",
            MetricKey::Per => "per",
            MetricKey::Pbr => "pbr",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven standardized ratios, in percent or multiples
///
/// Percent fields (`equity_ratio` through `dividend_yield`) are already
/// normalized to percent units; `per` and `pbr` are multiples.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    pub equity_ratio: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub net_income_growth: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub per: Option<f64>,
    pub pbr: Option<f64>,
}

impl FinancialMetrics {
    /// Value of one metric, `None` when unknown
    pub fn get(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::EquityRatio => self.equity_ratio,
            MetricKey::RevenueGrowth => self.revenue_growth,
            MetricKey::NetIncomeGrowth => self.net_income_growth,
            MetricKey::PayoutRatio => self.payout_ratio,
            MetricKey::DividendYield => self.dividend_yield,
            MetricKey::Per => self.per,
            MetricKey::Pbr => self.pbr,
        }
    }
}

/// Outcome of one rule applied to one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEvaluation {
    pub key: MetricKey,
    pub label: String,
    pub criterion: String,
    pub value: Option<f64>,
    pub unit: String,
    pub passed: bool,
}

/// Aggregate verdict derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// All seven metrics pass
    #[serde(rename = "◯")]
    Excellent,
    /// Five or six metrics pass
    #[serde(rename = "△")]
    Fair,
    /// Four or fewer metrics pass
    #[serde(rename = "×")]
    Poor,
}

impl Verdict {
    /// Map a score (number of passed metrics) to a verdict
    pub fn from_score(score: u8) -> Self {
        match score {
            7.. => Verdict::Excellent,
            5 | 6 => Verdict::Fair,
            _ => Verdict::Poor,
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Verdict::Excellent => "◯",
            Verdict::Fair => "△",
            Verdict::Poor => "×",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Full screening result for one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentResult {
    pub company: Company,
    pub metrics: FinancialMetrics,
    /// Seven evaluations in rule-table order
    pub evaluations: Vec<MetricEvaluation>,
    /// Number of passed evaluations (0-7)
    pub score: u8,
    pub verdict: Verdict,
}

/// AI-generated narrative for a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    /// Stage 1: macro-environment analysis
    pub meta_analysis_text: String,
    /// Stage 2: investment commentary
    pub investment_commentary_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verdict_breakpoints() {
        assert_eq!(Verdict::from_score(7), Verdict::Excellent);
        assert_eq!(Verdict::from_score(6), Verdict::Fair);
        assert_eq!(Verdict::from_score(5), Verdict::Fair);
        assert_eq!(Verdict::from_score(4), Verdict::Poor);
        assert_eq!(Verdict::from_score(0), Verdict::Poor);
    }

    #[test]
    fn test_verdict_serializes_as_symbol() {
        assert_eq!(serde_json::to_value(Verdict::Excellent).unwrap(), json!("◯"));
        assert_eq!(serde_json::to_value(Verdict::Fair).unwrap(), json!("△"));
        assert_eq!(serde_json::to_value(Verdict::Poor).unwrap(), json!("×"));

        let parsed: Verdict = serde_json::from_value(json!("△")).unwrap();
        assert_eq!(parsed, Verdict::Fair);
        assert!(serde_json::from_value::<Verdict>(json!("x")).is_err());
    }

    #[test]
    fn test_metrics_wire_format() {
        let metrics = FinancialMetrics {
            equity_ratio: Some(38.5),
            per: None,
            ..Default::default()
        };

        let value = serde_json::to_value(metrics).unwrap();
        assert_eq!(value["equityRatio"], json!(38.5));
        assert_eq!(value["per"], json!(null));
        assert_eq!(value["netIncomeGrowth"], json!(null));
    }

    #[test]
    fn test_metrics_get() {
        let metrics = FinancialMetrics {
            dividend_yield: Some(3.2),
            ..Default::default()
        };
        assert_eq!(metrics.get(MetricKey::DividendYield), Some(3.2));
        assert_eq!(metrics.get(MetricKey::Pbr), None);
    }

    #[test]
    fn test_metric_key_wire_name() {
        for key in MetricKey::ALL {
            assert_eq!(serde_json::to_value(key).unwrap(), json!(key.as_str()));
        }
    }
}
