//! Raw provider rows to [`FinancialMetrics`]
//!
//! Provider rows are deserialized loosely (every field optional, any JSON type)
//! and validated here so that a bad field produces a data error naming it.

use crate::error::{Result, StockError};
use crate::model::{Company, FinancialMetrics};
use serde::Deserialize;
use serde_json::Value;

/// Row from `search-name`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchNameRow {
    #[serde(default)]
    pub symbol: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub currency: Option<Value>,
    #[serde(default)]
    pub exchange: Option<Value>,
}

/// Row from `ratios-ttm`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatiosTtmRow {
    #[serde(default, rename = "priceToEarningsRatioTTM")]
    pub price_to_earnings_ratio_ttm: Option<Value>,
    #[serde(default, rename = "priceToBookRatioTTM")]
    pub price_to_book_ratio_ttm: Option<Value>,
    #[serde(default, rename = "dividendPayoutRatioTTM")]
    pub dividend_payout_ratio_ttm: Option<Value>,
    #[serde(default, rename = "dividendYieldTTM")]
    pub dividend_yield_ttm: Option<Value>,
}

/// Row from `financial-growth`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRow {
    #[serde(default)]
    pub revenue_growth: Option<Value>,
    #[serde(default)]
    pub net_income_growth: Option<Value>,
}

/// Row from `balance-sheet-statement`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetRow {
    #[serde(default)]
    pub total_stockholders_equity: Option<Value>,
    #[serde(default)]
    pub total_assets: Option<Value>,
}

/// Convert a fraction to percent when it looks like one
///
/// `|v| <= 1` is read as a fraction (0.064 becomes 6.4); anything larger is
/// already a percentage and is returned unchanged.
pub fn normalize_percent(value: f64) -> f64 {
    if value.abs() <= 1.0 {
        value * 100.0
    } else {
        value
    }
}

/// Negative values become unknown
pub fn suppress_negative(value: f64) -> Option<f64> {
    if value < 0.0 { None } else { Some(value) }
}

/// A finite JSON number
pub fn number_field(value: Option<&Value>, field: &str) -> Result<f64> {
    match value {
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| StockError::InvalidField(field.to_string())),
        _ => Err(StockError::InvalidField(field.to_string())),
    }
}

/// A non-blank JSON string, trimmed
pub fn string_field(value: Option<&Value>, field: &str) -> Result<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(StockError::InvalidField(field.to_string())),
    }
}

/// Row zero of a provider response
pub fn first_row<'a, T>(rows: &'a [T], endpoint: &str) -> Result<&'a T> {
    rows.first().ok_or_else(|| StockError::DataNotFound {
        endpoint: endpoint.to_string(),
    })
}

/// Build a [`Company`] from a search row, validating identity fields
pub fn company_from_row(row: &SearchNameRow) -> Result<Company> {
    Ok(Company {
        symbol: string_field(row.symbol.as_ref(), "symbol")?,
        name: string_field(row.name.as_ref(), "name")?,
        exchange: string_field(row.exchange.as_ref(), "exchange")?,
        currency: string_field(row.currency.as_ref(), "currency")?,
    })
}

/// Normalize the three provider responses into [`FinancialMetrics`]
///
/// Uses row zero of each source. Percent fields are normalized, negative
/// values of equity ratio, payout ratio, dividend yield, PER and PBR become
/// unknown, and growth rates keep their sign.
pub fn normalize_metrics(
    ratios: &[RatiosTtmRow],
    growth: &[GrowthRow],
    balance: &[BalanceSheetRow],
) -> Result<FinancialMetrics> {
    let ratios = first_row(ratios, "ratios-ttm")?;
    let growth = first_row(growth, "financial-growth")?;
    let balance = first_row(balance, "balance-sheet-statement")?;

    let total_equity = number_field(
        balance.total_stockholders_equity.as_ref(),
        "totalStockholdersEquity",
    )?;
    let total_assets = number_field(balance.total_assets.as_ref(), "totalAssets")?;

    if total_assets == 0.0 {
        return Err(StockError::ZeroTotalAssets);
    }

    let revenue_growth = number_field(growth.revenue_growth.as_ref(), "revenueGrowth")?;
    let net_income_growth = number_field(growth.net_income_growth.as_ref(), "netIncomeGrowth")?;
    let payout_ratio = number_field(
        ratios.dividend_payout_ratio_ttm.as_ref(),
        "dividendPayoutRatioTTM",
    )?;
    let dividend_yield = number_field(ratios.dividend_yield_ttm.as_ref(), "dividendYieldTTM")?;
    let per = number_field(
        ratios.price_to_earnings_ratio_ttm.as_ref(),
        "priceToEarningsRatioTTM",
    )?;
    let pbr = number_field(ratios.price_to_book_ratio_ttm.as_ref(), "priceToBookRatioTTM")?;

    Ok(FinancialMetrics {
        equity_ratio: suppress_negative(normalize_percent(total_equity / total_assets)),
        revenue_growth: Some(normalize_percent(revenue_growth)),
        net_income_growth: Some(normalize_percent(net_income_growth)),
        payout_ratio: suppress_negative(normalize_percent(payout_ratio)),
        dividend_yield: suppress_negative(normalize_percent(dividend_yield)),
        per: suppress_negative(per),
        pbr: suppress_negative(pbr),
    })
}
