// ABOUTME: Integration tests for the Gemini REST provider against a local stub server
// ABOUTME: Covers the request contract, status mapping and the request timeout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use fitcoach::errors::ErrorCode;
use fitcoach::llm::{ChatMessage, ChatRequest, GeminiConfig, GeminiProvider, LlmProvider};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// What the stub answers and what it received
struct StubApi {
    status: StatusCode,
    body: Value,
    delay: Duration,
    calls: Mutex<Vec<(String, HashMap<String, String>, Option<String>, Value)>>,
}

async fn generate_content(
    State(api): State<Arc<StubApi>>,
    Path(call): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    api.calls.lock().unwrap().push((call, query, key, body));
    tokio::time::sleep(api.delay).await;
    (api.status, Json(api.body.clone()))
}

/// Serve the stub on an ephemeral port and return its base URL
async fn start_stub(status: StatusCode, body: Value, delay: Duration) -> (String, Arc<StubApi>) {
    let api = Arc::new(StubApi {
        status,
        body,
        delay,
        calls: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/v1beta/models/:call", post(generate_content))
        .with_state(Arc::clone(&api));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{address}/v1beta"), api)
}

fn provider(base_url: &str) -> GeminiProvider {
    GeminiProvider::new(
        GeminiConfig::new("test-key")
            .with_base_url(base_url)
            .with_timeout(Duration::from_millis(500)),
    )
    .unwrap()
}

fn text_reply(parts: &[&str]) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": parts.iter().map(|t| json!({ "text": t })).collect::<Vec<_>>()
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 12,
            "candidatesTokenCount": 5,
            "totalTokenCount": 17
        }
    })
}

#[tokio::test]
async fn test_success_follows_the_rest_contract() {
    let (base, api) = start_stub(StatusCode::OK, text_reply(&["Hello", " there"]), Duration::ZERO).await;

    let request = ChatRequest::new(vec![
        ChatMessage::system("Be brief."),
        ChatMessage::user("Say hello."),
    ]);
    let response = provider(&base).complete(&request).await.unwrap();

    assert_eq!(response.content, "Hello there");
    assert_eq!(response.model, "gemini-2.5-flash-lite");
    assert_eq!(response.usage.unwrap().total_tokens, 17);
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));

    let calls = api.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (call, query, key, body) = &calls[0];
    assert_eq!(call, "gemini-2.5-flash-lite:generateContent");
    assert_eq!(key.as_deref(), Some("test-key"));
    assert!(query.is_empty());
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Say hello.");
    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be brief.");
}

#[tokio::test]
async fn test_request_model_overrides_default() {
    let (base, api) = start_stub(StatusCode::OK, text_reply(&["ok"]), Duration::ZERO).await;

    let request = ChatRequest::prompt("Describe oats").with_model("gemini-1.5-flash");
    let response = provider(&base).complete(&request).await.unwrap();

    assert_eq!(response.model, "gemini-1.5-flash");
    assert_eq!(api.calls.lock().unwrap()[0].0, "gemini-1.5-flash:generateContent");
}

#[tokio::test]
async fn test_rate_limit_becomes_friendly_message() {
    let body = json!({ "error": { "message": "Quota exceeded. Please retry in 6.4s." } });
    let (base, _api) = start_stub(StatusCode::TOO_MANY_REQUESTS, body, Duration::ZERO).await;

    let err = provider(&base)
        .complete(&ChatRequest::prompt("hi"))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalRateLimited);
    assert_eq!(err.message, "AI service quota exceeded. Please try again in 7 seconds.");
}

#[tokio::test]
async fn test_server_error_is_external_service_error() {
    let body = json!({ "error": { "message": "internal" } });
    let (base, _api) = start_stub(StatusCode::INTERNAL_SERVER_ERROR, body, Duration::ZERO).await;

    let err = provider(&base)
        .complete(&ChatRequest::prompt("hi"))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(err.message.contains("API error (500): internal"));
}

#[tokio::test]
async fn test_empty_candidates_are_rejected() {
    let (base, _api) = start_stub(StatusCode::OK, json!({ "candidates": [] }), Duration::ZERO).await;

    let err = provider(&base)
        .complete(&ChatRequest::prompt("hi"))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_timeout_is_unavailable() {
    let (base, _api) = start_stub(StatusCode::OK, text_reply(&["late"]), Duration::from_secs(3)).await;

    let err = provider(&base)
        .complete(&ChatRequest::prompt("hi"))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(err.message.contains("timed out"));
}

#[tokio::test]
async fn test_unreachable_server_is_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let err = provider(&format!("http://{address}/v1beta"))
        .complete(&ChatRequest::prompt("hi"))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
}

#[tokio::test]
async fn test_transport_error_does_not_leak_api_key() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let provider = GeminiProvider::new(
        GeminiConfig::new("SUPER-SECRET-KEY").with_base_url(format!("http://{address}/v1beta")),
    )
    .unwrap();
    let err = provider
        .complete(&ChatRequest::prompt("hi"))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(!err.message.contains("SUPER-SECRET-KEY"));
    assert!(!err.to_string().contains("SUPER-SECRET-KEY"));
    assert!(!format!("{err:?}").contains("SUPER-SECRET-KEY"));
}

#[test]
fn test_empty_key_is_rejected() {
    let err = GeminiProvider::new(GeminiConfig::new("  ")).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);
}
