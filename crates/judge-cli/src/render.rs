//! Terminal rendering for search results, evaluations, and narratives

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use judge_stock::prompts::{format_metric_value, pass_label};
use judge_stock::{Company, InvestmentResult, Language, Narrative, Verdict};

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Numbered company list, numbers usable with `/select`
pub fn companies_table(companies: &[Company]) -> Table {
    let mut table = base_table();
    table.set_header(vec!["#", "Symbol", "Name", "Exchange", "Currency"]);
    for (i, company) in companies.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            company.symbol.clone(),
            company.name.clone(),
            company.exchange.clone(),
            company.currency.clone(),
        ]);
    }
    table
}

/// One row per metric in rule order
pub fn evaluation_table(result: &InvestmentResult, lang: &Language) -> Table {
    let mut table = base_table();
    let header = match lang {
        Language::Japanese => vec!["指標", "基準", "値", "判定"],
        _ => vec!["Metric", "Criterion", "Value", "Result"],
    };
    table.set_header(header);

    for evaluation in &result.evaluations {
        let color = if evaluation.passed {
            Color::Green
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new(&evaluation.label),
            Cell::new(&evaluation.criterion),
            Cell::new(format_metric_value(evaluation.value, &evaluation.unit, lang)),
            Cell::new(pass_label(evaluation.passed, lang)).fg(color),
        ]);
    }
    table
}

/// `◯ Excellent (7/7)` style summary line
pub fn verdict_line(result: &InvestmentResult) -> String {
    let name = match result.verdict {
        Verdict::Excellent => "Excellent",
        Verdict::Fair => "Fair",
        Verdict::Poor => "Poor",
    };
    format!(
        "{} {} {} ({}/{})",
        result.company.symbol,
        result.verdict.symbol(),
        name,
        result.score,
        result.evaluations.len()
    )
}

pub fn narrative_text(narrative: &Narrative, lang: &Language) -> String {
    let (meta, commentary) = match lang {
        Language::Japanese => ("メタ分析", "投資解説"),
        _ => ("Meta analysis", "Investment commentary"),
    };
    format!(
        "== {meta} ==\n{}\n\n== {commentary} ==\n{}",
        narrative.meta_analysis_text, narrative.investment_commentary_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use judge_stock::{FinancialMetrics, evaluate_localized};

    fn coca_cola() -> InvestmentResult {
        let metrics = FinancialMetrics {
            equity_ratio: Some(25.0),
            revenue_growth: Some(3.2),
            net_income_growth: Some(-1.5),
            payout_ratio: Some(75.0),
            dividend_yield: Some(3.1),
            per: Some(24.0),
            pbr: None,
        };
        evaluate_localized(
            &Company::new("KO", "Coca-Cola Company", "NYSE", "USD"),
            metrics,
            &Language::English,
        )
    }

    #[test]
    fn test_companies_table_numbers_rows() {
        let companies = vec![
            Company::new("KO", "Coca-Cola Company", "NYSE", "USD"),
            Company::new("KOF", "Coca-Cola FEMSA", "NYSE", "USD"),
        ];
        let rendered = companies_table(&companies).to_string();

        assert!(rendered.contains("Coca-Cola FEMSA"));
        assert!(rendered.contains(" 2 "));
    }

    #[test]
    fn test_evaluation_table_shows_unknown_and_labels() {
        let result = coca_cola();
        let rendered = evaluation_table(&result, &Language::English).to_string();

        assert!(rendered.contains("Equity ratio"));
        assert!(rendered.contains("25%"));
        assert!(rendered.contains("unknown"));
        assert!(rendered.contains("fail"));
    }

    #[test]
    fn test_verdict_line() {
        let result = coca_cola();
        assert_eq!(result.score, 4);
        assert_eq!(verdict_line(&result), "KO × Poor (4/7)");
    }

    #[test]
    fn test_narrative_text_headings() {
        let narrative = Narrative {
            meta_analysis_text: "meta".to_string(),
            investment_commentary_text: "commentary".to_string(),
        };
        let text = narrative_text(&narrative, &Language::Japanese);
        assert!(text.starts_with("== メタ分析 ==\nmeta"));
        assert!(text.ends_with("commentary"));
    }
}
