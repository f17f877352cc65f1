//! Routes and handlers

use crate::error::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use judge_stock::{Company, FinancialMetrics, InvestmentResult, Narrative, evaluate_localized};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

const MIN_QUERY_CHARS: usize = 2;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/fmp/search-name", get(search_name))
        .route("/api/fmp/metrics", get(metrics))
        .route("/api/evaluate", post(evaluate))
        .route("/api/ai/investment-analysis", post(investment_analysis))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "stock-judge",
    }))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    query: Option<String>,
}

/// Company candidates; short queries answer `[]` without calling upstream
async fn search_name(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let query = params.query.unwrap_or_default();
    let query = query.trim();

    if query.chars().count() < MIN_QUERY_CHARS {
        return Ok(Json(Vec::new()));
    }

    let companies = state.source.search_companies(query).await?;
    Ok(Json(companies))
}

#[derive(Debug, Deserialize)]
struct MetricsQuery {
    symbol: Option<String>,
}

async fn metrics(
    State(state): State<AppState>,
    Query(params): Query<MetricsQuery>,
) -> Result<Json<FinancialMetrics>, ApiError> {
    let symbol = params.symbol.unwrap_or_default();
    let symbol = symbol.trim();

    if symbol.is_empty() {
        return Err(ApiError::bad_request("symbol query parameter is required"));
    }

    let metrics = state.source.fetch_financial_metrics(symbol).await?;
    Ok(Json(metrics))
}

#[derive(Debug, Deserialize)]
struct EvaluateRequest {
    company: Company,
    metrics: FinancialMetrics,
}

/// Parse a JSON body, mapping every failure to 400
fn parse_body<T: serde::de::DeserializeOwned>(body: &Bytes, what: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::bad_request("Failed to parse request JSON"))?;
    serde_json::from_value(value).map_err(|e| ApiError::bad_request(format!("Invalid {what}: {e}")))
}

async fn evaluate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<InvestmentResult>, ApiError> {
    let request: EvaluateRequest = parse_body(&body, "evaluation request")?;
    let result = evaluate_localized(&request.company, request.metrics, &state.language);
    info!(
        symbol = %result.company.symbol,
        score = result.score,
        verdict = %result.verdict,
        "Evaluated"
    );
    Ok(Json(result))
}

/// Two-stage narrative for a client-supplied result
async fn investment_analysis(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Narrative>, ApiError> {
    let result: InvestmentResult = parse_body(&body, "investment result")?;
    let narrative = state.narrator.generate(&result).await?;
    Ok(Json(narrative))
}
