//! HTTP-level tests for the Gemini provider against a mock server

use judge_llm::providers::{GeminiConfig, GeminiProvider};
use judge_llm::{GenerationRequest, LLMError, TextGenerator};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-3-flash-preview";
const ENDPOINT: &str = "/v1beta/models/gemini-3-flash-preview:generateContent";

fn provider(server: &MockServer) -> GeminiProvider {
    let config = GeminiConfig::new("test-key").with_api_base(format!("{}/v1beta", server.uri()));
    GeminiProvider::with_config(config).unwrap()
}

fn request(prompt: &str) -> GenerationRequest {
    GenerationRequest::builder(MODEL, prompt).build()
}

#[tokio::test]
async fn test_generate_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_json(json!({
            "contents": [{ "parts": [{ "text": "Analyze KO" }] }],
            "generationConfig": { "responseMimeType": "text/plain" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Stable " }, { "text": "demand.\n" }] }
            }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = provider(&server).generate(request("Analyze KO")).await.unwrap();

    assert_eq!(response.text, "Stable demand.");
    let usage = response.usage.unwrap();
    assert_eq!(usage.input_tokens, 12);
    assert_eq!(usage.output_tokens, 3);
}

#[tokio::test]
async fn test_generate_passes_through_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": 429,
                "message": "Resource has been exhausted",
                "status": "RESOURCE_EXHAUSTED"
            }
        })))
        .mount(&server)
        .await;

    let err = provider(&server).generate(request("p")).await.unwrap_err();

    assert_eq!(err.status(), 429);
    assert_eq!(err.code(), "upstream_http_error");
    assert_eq!(err.to_string(), "Resource has been exhausted");
}

#[tokio::test]
async fn test_generate_unparseable_error_uses_response_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = provider(&server).generate(request("p")).await.unwrap_err();

    assert!(matches!(err, LLMError::UpstreamHttp { status: 503, .. }));
    assert_eq!(err.code(), "upstream_http_error");
}

#[tokio::test]
async fn test_generate_invalid_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = provider(&server).generate(request("p")).await.unwrap_err();

    assert_eq!(err.status(), 502);
    assert_eq!(err.code(), "invalid_json");
}

#[tokio::test]
async fn test_generate_empty_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "  \n " }] } }]
        })))
        .mount(&server)
        .await;

    let err = provider(&server).generate(request("p")).await.unwrap_err();

    assert!(matches!(err, LLMError::EmptyTextResponse));
    assert_eq!(err.status(), 502);
    assert_eq!(err.code(), "empty_text_response");
}

#[tokio::test]
async fn test_generate_missing_key_skips_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = GeminiConfig::new("  ").with_api_base(server.uri());
    let provider = GeminiProvider::with_config(config).unwrap();
    let err = provider.generate(request("p")).await.unwrap_err();

    assert_eq!(err.status(), 500);
    assert_eq!(err.code(), "missing_api_key");
}

#[tokio::test]
async fn test_generate_network_error() {
    let config = GeminiConfig::new("test-key")
        .with_api_base("http://127.0.0.1:1")
        .with_timeout(2);
    let provider = GeminiProvider::with_config(config).unwrap();

    let err = provider.generate(request("p")).await.unwrap_err();

    assert_eq!(err.status(), 502);
    assert_eq!(err.code(), "network_error");
}
