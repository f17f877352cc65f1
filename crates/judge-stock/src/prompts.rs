//! Prompt templates for the two-stage narrative
//!
//! Stage 1 asks for a macro-environment analysis of the company. Stage 2 feeds
//! the screening result and the stage-1 text back to the model and asks for an
//! investment commentary.

use crate::error::Result;
use crate::evaluate::RULES;
use crate::model::InvestmentResult;
use judge_prompt::{JinjaTemplate, Language, PromptTemplate};
use serde_json::json;

const META_ANALYSIS_JA: &str = r"
# Role
あなたは未来予測に定評のある「戦略コンサルタント」です。
マクロ経済、テクノロジーの進化、社会情勢の変化といったメタ情報を読み解き、それが企業へ与える影響を論理的に分析してください。

# Task
対象企業について、現代の主要なマクロトレンドとの適合性を分析してください。
特に「AI技術の進展」と「パンデミック後の社会変化」が、追い風か向かい風かを明確に評価してください。

# Input Data
対象企業: {{ company_name }}

# Analysis Framework
1. テクノロジーの特異点（AI・DX）
- 生成AIや自動化技術は同社を強化するか、破壊するか
- 同社はテクノロジー進化に適応できているか

2. 社会・ライフスタイルの変容（ポスト・パンデミック）
- リモートワーク、非接触、健康意識の定着は同社に有利か
- サステナビリティ重視など価値観変化に対応できているか

3. 市場構造と競争環境
- 業界パイは拡大か縮小か
- 異業種参入リスクはあるか

# Output
- 日本語で、投資家が読みやすい平易な文章のみで回答してください。
- 箇条書きは使っても良いですが、表は不要です。
- 最後に「総合的な環境評価」として結論を文章で明示してください。
";

const META_ANALYSIS_EN: &str = r#"
# Role
You are a strategy consultant known for accurate long-range forecasts.
Read macroeconomic, technological and social signals and reason about how they affect the company.

# Task
Assess how well the company fits today's major macro trends.
State clearly whether advances in AI and the post-pandemic shift in society are a tailwind or a headwind.

# Input Data
Company: {{ company_name }}

# Analysis Framework
1. Technology inflection (AI and digital transformation)
- Will generative AI and automation strengthen or disrupt the company?
- Is the company adapting to technological change?

2. Social and lifestyle change (post-pandemic)
- Do remote work, contactless habits and health awareness favour the company?
- Is it responding to shifting values such as sustainability?

3. Market structure and competition
- Is the industry growing or shrinking?
- Is there a risk of entrants from other industries?

# Output
- Answer in English, in plain prose an investor can read easily.
- Bullet points are fine; do not use tables.
- Close with an explicit conclusion titled "Overall environment assessment".
"#;

const COMMENTARY_JA: &str = r"
# Role
あなたは厳格な規律を持つ「バリュー株投資家」です。
感情を排し、数字（ファンダメンタルズ）に基づいて投資判断を行ってください。

# Task
対象企業の財務データを7基準で点検し、投資対象として魅力的かを講評してください。

# Input Data
対象企業: {{ company_name }} ({{ symbol }})
総合判定: {{ verdict }}
スコア: {{ score }} / 7

## 7つの基準と現在値
{% for item in screening %}
{{ loop.index }}. {{ item.label }}: {{ item.value }} / 基準={{ item.criterion }} / 判定={{ item.status }}
{% endfor %}

## 財務指標の生データ
{% for item in raw_metrics %}
{{ item.label }}: {{ item.value }}
{% endfor %}

## 参考メタ分析（外部環境）
{{ meta_analysis }}

# Output
- 日本語で、投資家向けにわかりやすい文章のみで回答してください。
- 表は不要です（文章で説明してください）。
- 次の3点を必ず含めてください:
  1. 強み
  2. 懸念
  3. 総合判断（「積極的に投資したい / 条件付きで検討 / 様子見 / 投資対象外」のいずれかを文章中で明示）
";

const COMMENTARY_EN: &str = r"
# Role
You are a disciplined value investor.
Set emotion aside and judge the investment on the numbers (fundamentals).

# Task
Check the company's financial data against the seven criteria and assess whether it is an attractive investment.

# Input Data
Company: {{ company_name }} ({{ symbol }})
Verdict: {{ verdict }}
Score: {{ score }} / 7

## The seven criteria and current values
{% for item in screening %}
{{ loop.index }}. {{ item.label }}: {{ item.value }} / criterion={{ item.criterion }} / result={{ item.status }}
{% endfor %}

## Raw financial metrics
{% for item in raw_metrics %}
{{ item.label }}: {{ item.value }}
{% endfor %}

## Reference macro analysis (external environment)
{{ meta_analysis }}

# Output
- Answer in English, in prose written for investors.
- Do not use tables.
- Always cover these three points:
  1. Strengths
  2. Concerns
  3. Overall judgement (state exactly one of: strong buy / consider conditionally / hold and watch / avoid)
";

/// Stage 1 template
pub fn meta_analysis_template() -> judge_prompt::Result<JinjaTemplate> {
    JinjaTemplate::bilingual("stock.meta_analysis", META_ANALYSIS_EN, META_ANALYSIS_JA)
}

/// Stage 2 template
pub fn investment_commentary_template() -> judge_prompt::Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        "stock.investment_commentary",
        COMMENTARY_EN,
        COMMENTARY_JA,
    )
}

/// Placeholder for an unknown metric value
pub fn unknown_placeholder(lang: &Language) -> &'static str {
    match lang {
        Language::Japanese => "不明",
        _ => "unknown",
    }
}

/// Format a metric value with its unit, or the localized unknown placeholder
pub fn format_metric_value(value: Option<f64>, unit: &str, lang: &Language) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => unknown_placeholder(lang).to_string(),
    }
}

/// Localized pass/fail label for one metric
pub fn pass_label(passed: bool, lang: &Language) -> &'static str {
    match (lang, passed) {
        (Language::Japanese, true) => "合格",
        (Language::Japanese, false) => "不合格",
        (_, true) => "pass",
        (_, false) => "fail",
    }
}

/// Build the stage-1 prompt for a company
pub fn build_meta_analysis_prompt(company_name: &str, lang: &Language) -> Result<String> {
    let prompt = meta_analysis_template()?
        .render_with_fallback(lang, &json!({ "company_name": company_name }))?;
    Ok(prompt.trim().to_string())
}

/// Build the stage-2 prompt from the screening result and the stage-1 text
pub fn build_investment_commentary_prompt(
    result: &InvestmentResult,
    meta_analysis_text: &str,
    lang: &Language,
) -> Result<String> {
    let screening: Vec<_> = result
        .evaluations
        .iter()
        .map(|ev| {
            json!({
                "label": ev.label,
                "value": format_metric_value(ev.value, &ev.unit, lang),
                "criterion": ev.criterion,
                "status": pass_label(ev.passed, lang),
            })
        })
        .collect();

    let raw_metrics: Vec<_> = RULES
        .iter()
        .map(|rule| {
            json!({
                "label": rule.label.get(lang),
                "value": format_metric_value(
                    result.metrics.get(rule.key),
                    rule.unit.get(lang),
                    lang,
                ),
            })
        })
        .collect();

    let vars = json!({
        "company_name": result.company.name,
        "symbol": result.company.symbol,
        "verdict": result.verdict.symbol(),
        "score": result.score,
        "screening": screening,
        "raw_metrics": raw_metrics,
        "meta_analysis": meta_analysis_text,
    });

    let prompt = investment_commentary_template()?.render_with_fallback(lang, &vars)?;
    Ok(prompt.trim().to_string())
}
