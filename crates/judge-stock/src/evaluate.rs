//! Rule table and scoring
//!
//! Seven fixed thresholds are applied to [`FinancialMetrics`]. An unknown value
//! never passes, so missing data always counts against the score.

use crate::model::{
    Company, FinancialMetrics, InvestmentResult, MetricEvaluation, MetricKey, Verdict,
};
use judge_prompt::Language;

/// A string with Japanese and English variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized {
    pub ja: &'static str,
    pub en: &'static str,
}

impl Localized {
    /// Japanese for [`Language::Japanese`], English for everything else
    pub fn get(&self, lang: &Language) -> &'static str {
        match lang {
            Language::Japanese => self.ja,
            _ => self.en,
        }
    }
}

/// One screening rule
#[derive(Debug, Clone, Copy)]
pub struct MetricRule {
    pub key: MetricKey,
    pub label: Localized,
    pub criterion: Localized,
    pub unit: Localized,
    predicate: fn(f64) -> bool,
}

impl MetricRule {
    /// Apply the threshold; unknown values fail
    pub fn check(&self, value: Option<f64>) -> bool {
        value.is_some_and(self.predicate)
    }

    fn evaluate(&self, metrics: &FinancialMetrics, lang: &Language) -> MetricEvaluation {
        let value = metrics.get(self.key);
        MetricEvaluation {
            key: self.key,
            label: self.label.get(lang).to_string(),
            criterion: self.criterion.get(lang).to_string(),
            value,
            unit: self.unit.get(lang).to_string(),
            passed: self.check(value),
        }
    }
}

fn at_least_20(v: f64) -> bool {
    v >= 20.0
}

fn at_least_30(v: f64) -> bool {
    v >= 30.0
}

fn at_least_3(v: f64) -> bool {
    v >= 3.0
}

fn at_most_20(v: f64) -> bool {
    v <= 20.0
}

fn at_most_2(v: f64) -> bool {
    v <= 2.0
}

fn positive(v: f64) -> bool {
    v > 0.0
}

const PERCENT: Localized = Localized { ja: "%", en: "%" };
const TIMES: Localized = Localized { ja: "倍", en: "x" };

/// The rule table, in evaluation order
pub const RULES: [MetricRule; 7] = [
    MetricRule {
        key: MetricKey::EquityRatio,
        label: Localized {
            ja: "自己資本比率",
            en: "Equity ratio",
        },
        criterion: Localized {
            ja: "20%以上",
            en: "20% or more",
        },
        unit: PERCENT,
        predicate: at_least_20,
    },
    MetricRule {
        key: MetricKey::RevenueGrowth,
        label: Localized {
            ja: "売上高成長率",
            en: "Revenue growth",
        },
        criterion: Localized {
            ja: "前年比プラス",
            en: "Positive year over year",
        },
        unit: PERCENT,
        predicate: positive,
    },
    MetricRule {
        key: MetricKey::NetIncomeGrowth,
        label: Localized {
            ja: "当期純利益伸び率",
            en: "Net income growth",
        },
        criterion: Localized {
            ja: "前年比プラス",
            en: "Positive year over year",
        },
        unit: PERCENT,
        predicate: positive,
    },
    MetricRule {
        key: MetricKey::PayoutRatio,
        label: Localized {
            ja: "配当性向",
            en: "Payout ratio",
        },
        criterion: Localized {
            ja: "30%以上",
            en: "30% or more",
        },
        unit: PERCENT,
        predicate: at_least_30,
    },
    MetricRule {
        key: MetricKey::DividendYield,
        label: Localized {
            ja: "配当利回り",
            en: "Dividend yield",
        },
        criterion: Localized {
            ja: "3%以上",
            en: "3% or more",
        },
        unit: PERCENT,
        predicate: at_least_3,
    },
    MetricRule {
        key: MetricKey::Per,
        label: Localized { ja: "PER", en: "P/E" },
        criterion: Localized {
            ja: "20倍以下",
            en: "20x or less",
        },
        unit: TIMES,
        predicate: at_most_20,
    },
    MetricRule {
        key: MetricKey::Pbr,
        label: Localized { ja: "PBR", en: "P/B" },
        criterion: Localized {
            ja: "2倍以下",
            en: "2x or less",
        },
        unit: TIMES,
        predicate: at_most_2,
    },
];

/// Look up the rule for a metric
pub fn rule(key: MetricKey) -> &'static MetricRule {
    match key {
        MetricKey::EquityRatio => &RULES[0],
        MetricKey::RevenueGrowth => &RULES[1],
        MetricKey::NetIncomeGrowth => &RULES[2],
        MetricKey::PayoutRatio => &RULES[3],
        MetricKey::DividendYield => &RULES[4],
        MetricKey::Per => &RULES[5],
        MetricKey::Pbr => &RULES[6],
    }
}

/// Evaluate a company with Japanese labels
pub fn evaluate(company: &Company, metrics: FinancialMetrics) -> InvestmentResult {
    evaluate_localized(company, metrics, &Language::Japanese)
}

/// Evaluate a company, rendering labels and criteria in `lang`
///
/// Scoring is independent of the language.
pub fn evaluate_localized(
    company: &Company,
    metrics: FinancialMetrics,
    lang: &Language,
) -> InvestmentResult {
    let evaluations: Vec<MetricEvaluation> = RULES
        .iter()
        .map(|rule| rule.evaluate(&metrics, lang))
        .collect();

    let score = evaluations.iter().filter(|e| e.passed).count() as u8;

    InvestmentResult {
        company: company.clone(),
        metrics,
        evaluations,
        score,
        verdict: Verdict::from_score(score),
    }
}
