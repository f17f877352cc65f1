//! HTTP-level tests for the FMP client against a mock server

use judge_stock::{FinancialDataSource, FmpClient, StockConfig, StockError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> FmpClient {
    let config = StockConfig::builder()
        .fmp_api_key("test-key")
        .fmp_base_url(server.uri())
        .build()
        .unwrap();
    FmpClient::from_config(&config).unwrap()
}

async fn mount_metrics(server: &MockServer, ratios: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/ratios-ttm"))
        .and(query_param("symbol", "KO"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ratios))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/financial-growth"))
        .and(query_param("symbol", "KO"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "symbol": "KO", "revenueGrowth": 0.064, "netIncomeGrowth": -0.035 }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/balance-sheet-statement"))
        .and(query_param("symbol", "KO"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "symbol": "KO", "totalStockholdersEquity": 250.0, "totalAssets": 1000.0 }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_financial_metrics() {
    let server = MockServer::start().await;
    mount_metrics(
        &server,
        json!([{
            "symbol": "KO",
            "priceToEarningsRatioTTM": 24.1,
            "priceToBookRatioTTM": 10.2,
            "dividendPayoutRatioTTM": 0.75,
            "dividendYieldTTM": 0.031
        }]),
    )
    .await;

    let metrics = client(&server).fetch_financial_metrics("KO").await.unwrap();

    assert_eq!(metrics.equity_ratio, Some(25.0));
    assert_eq!(metrics.revenue_growth, Some(6.4));
    assert!((metrics.net_income_growth.unwrap() + 3.5).abs() < 1e-9);
    assert_eq!(metrics.payout_ratio, Some(75.0));
    assert!((metrics.dividend_yield.unwrap() - 3.1).abs() < 1e-9);
    assert_eq!(metrics.per, Some(24.1));
    assert_eq!(metrics.pbr, Some(10.2));
}

#[tokio::test]
async fn test_empty_ratios_is_data_not_found() {
    let server = MockServer::start().await;
    mount_metrics(&server, json!([])).await;

    let err = client(&server).fetch_financial_metrics("KO").await.unwrap_err();

    match &err {
        StockError::DataNotFound { endpoint } => assert_eq!(endpoint, "ratios-ttm"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.status(), 422);
}

#[tokio::test]
async fn test_premium_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search-name"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "Premium Query Parameter: this value is not available on your plan",
        ))
        .mount(&server)
        .await;

    let err = client(&server).search_companies("Toyota").await.unwrap_err();

    assert!(matches!(err, StockError::PremiumLimited));
    assert_eq!(err.code(), "premium_limited");
    assert_eq!(err.status(), 422);
}

#[tokio::test]
async fn test_upstream_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search-name"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "Error Message": "Invalid API KEY" })),
        )
        .mount(&server)
        .await;

    let err = client(&server).search_companies("Coca").await.unwrap_err();

    assert_eq!(err.code(), "upstream_http_error");
    assert_eq!(err.status(), 502);
}

#[tokio::test]
async fn test_invalid_json_and_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search-name"))
        .and(query_param("query", "broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search-name"))
        .and(query_param("query", "object"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "symbol": "KO" })))
        .mount(&server)
        .await;

    let client = client(&server);

    let err = client.search_companies("broken").await.unwrap_err();
    assert_eq!(err.code(), "invalid_json");
    assert_eq!(err.status(), 502);

    let err = client.search_companies("object").await.unwrap_err();
    assert_eq!(err.code(), "unexpected_response_shape");
    assert_eq!(err.status(), 502);
}

#[tokio::test]
async fn test_search_filters_and_dedupes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search-name"))
        .and(query_param("query", "Coca"))
        .and(query_param("limit", "30"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "symbol": "KO", "name": "The Coca-Cola Company", "currency": "USD", "exchange": "NYSE" },
            { "symbol": "KO", "name": "The Coca-Cola Company", "currency": "USD", "exchange": "NYSE" },
            { "symbol": "KO.DE", "name": "Coca-Cola (Xetra)", "currency": "EUR", "exchange": "XETRA" },
            { "symbol": "COKE", "name": "Coca-Cola Consolidated", "currency": "USD", "exchange": "NASDAQ" },
            { "symbol": "CCEP", "name": "", "currency": "USD", "exchange": "NASDAQ" },
            { "symbol": "KOF", "currency": "USD", "exchange": "NYSE" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let companies = client(&server).search_companies("  Coca  ").await.unwrap();

    let symbols: Vec<&str> = companies.iter().map(|c| c.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["KO", "COKE"]);
    assert_eq!(companies[0].name, "The Coca-Cola Company");
}

#[tokio::test]
async fn test_short_query_skips_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let companies = client(&server).search_companies(" K ").await.unwrap();
    assert!(companies.is_empty());
}

#[tokio::test]
async fn test_search_skips_non_object_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search-name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            null,
            42,
            "KO",
            { "symbol": "KO", "name": "The Coca-Cola Company", "currency": "USD", "exchange": "NYSE" }
        ])))
        .mount(&server)
        .await;

    let companies = client(&server).search_companies("Coca").await.unwrap();

    let symbols: Vec<&str> = companies.iter().map(|c| c.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["KO"]);
}

#[tokio::test]
async fn test_lookup_single_letter_symbol() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search-symbol"))
        .and(query_param("query", "F"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "symbol": "FNV", "name": "Franco-Nevada", "currency": "USD", "exchange": "NYSE" },
            { "symbol": "F", "name": "Ford Motor Company", "currency": "USD", "exchange": "NYSE" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let company = client(&server).lookup_symbol(" f ").await.unwrap().unwrap();

    assert_eq!(company.symbol, "F");
    assert_eq!(company.name, "Ford Motor Company");
}

#[tokio::test]
async fn test_lookup_symbol_not_listed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search-symbol"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "symbol": "7203.T", "name": "Toyota Motor", "currency": "JPY", "exchange": "JPX" }
        ])))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.lookup_symbol("7203.T").await.unwrap().is_none());

    let err = client.lookup_symbol("  ").await.unwrap_err();
    assert_eq!(err.code(), "bad_request");
}
