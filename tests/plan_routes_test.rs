// ABOUTME: HTTP tests for plan generation, motivation quote and image caption routes
// ABOUTME: Drives the full router with a stub gateway and checks status codes and bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::io;
use std::sync::{Arc, Mutex};

use fitcoach::constants::messages::{
    IMAGE_GENERATION_FAILED, MISSING_PROMPT, MISSING_REQUIRED_FIELDS,
};
use fitcoach::constants::plan::FALLBACK_QUOTE;
use fitcoach::models::Plan;
use fitcoach::plans::PlanGateway;
use fitcoach::routes;
use helpers::axum_test::AxumTestRequest;
use helpers::fixtures::{ana_submission, sample_plan, upstream_failure, StubGateway};
use serde_json::{json, Value};
use tracing::subscriber::set_default;
use uuid::Uuid;

fn app(stub: &Arc<StubGateway>) -> axum::Router {
    let gateway: Arc<dyn PlanGateway> = stub.clone();
    routes::router(gateway, &[])
}

// ============================================================================
// POST /generate-plan
// ============================================================================

#[tokio::test]
async fn test_generate_plan_returns_plan() {
    let stub = Arc::new(StubGateway::succeeding());

    let response = AxumTestRequest::post("/generate-plan")
        .json(&ana_submission())
        .send(app(&stub))
        .await;

    assert_eq!(response.status(), 200);
    let plan: Plan = response.json();
    assert_eq!(plan, sample_plan());
    assert_eq!(stub.plan_calls(), 1);
}

#[tokio::test]
async fn test_generate_plan_uses_camel_case_wire_names() {
    let stub = Arc::new(StubGateway::succeeding());

    let body: Value = AxumTestRequest::post("/generate-plan")
        .json(&ana_submission())
        .send(app(&stub))
        .await
        .json();

    assert!(body["workoutPlan"].is_array());
    assert!(body["dietPlan"]["breakfast"].is_object());
    assert_eq!(body["workoutPlan"][0]["exercises"][0]["restTime"], "60 seconds");
}

#[tokio::test]
async fn test_missing_name_is_rejected_without_model_call() {
    let stub = Arc::new(StubGateway::succeeding());
    let mut submission = ana_submission();
    submission.name = None;

    let response = AxumTestRequest::post("/generate-plan")
        .json(&submission)
        .send(app(&stub))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": MISSING_REQUIRED_FIELDS }));
    assert_eq!(stub.plan_calls(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let stub = Arc::new(StubGateway::succeeding());

    let response = AxumTestRequest::post("/generate-plan")
        .raw_json("{ not json")
        .send(app(&stub))
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(stub.plan_calls(), 0);
}

#[tokio::test]
async fn test_unknown_enum_value_is_rejected() {
    let stub = Arc::new(StubGateway::succeeding());
    let mut body = serde_json::to_value(ana_submission()).unwrap();
    body["fitnessGoal"] = json!("become-a-wizard");

    let response = AxumTestRequest::post("/generate-plan")
        .json(&body)
        .send(app(&stub))
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(stub.plan_calls(), 0);
}

#[tokio::test]
async fn test_upstream_failure_returns_generic_error() {
    let stub = Arc::new(StubGateway::succeeding());
    stub.set_plan(Err(upstream_failure()));

    let response = AxumTestRequest::post("/generate-plan")
        .json(&ana_submission())
        .send(app(&stub))
        .await;

    assert_eq!(response.status(), 500);
    let text = response.text();
    assert_eq!(text, r#"{"error":"Failed to generate fitness plan"}"#);
    assert!(!text.contains("stub upstream failure"));
    assert_eq!(stub.plan_calls(), 1);
}

/// Collects formatted log output for assertions
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn rejection_log(body: &Value) -> String {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = set_default(subscriber);

    let stub = Arc::new(StubGateway::succeeding());
    let response = AxumTestRequest::post("/generate-plan")
        .json(body)
        .send(app(&stub))
        .await;
    assert_eq!(response.status(), 400);

    logs.contents()
}

#[tokio::test]
async fn test_rejection_log_tells_invalid_from_incomplete() {
    let mut invalid = serde_json::to_value(ana_submission()).unwrap();
    invalid["fitnessGoal"] = json!("become-a-wizard");
    let logs = rejection_log(&invalid).await;
    assert!(logs.contains("Rejected invalid profile"), "{logs}");
    assert!(!logs.contains("Rejected incomplete profile"), "{logs}");

    let mut incomplete = ana_submission();
    incomplete.name = None;
    let logs = rejection_log(&serde_json::to_value(incomplete).unwrap()).await;
    assert!(logs.contains("Rejected incomplete profile"), "{logs}");
}

// ============================================================================
// GET /motivation-quote
// ============================================================================

#[tokio::test]
async fn test_motivation_quote() {
    let stub = Arc::new(StubGateway::succeeding());

    let response = AxumTestRequest::get("/motivation-quote")
        .send(app(&stub))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!({ "quote": "Small steps every day" }));
    assert_eq!(stub.quote_calls(), 1);
}

#[tokio::test]
async fn test_motivation_quote_falls_back_on_failure() {
    let stub = Arc::new(StubGateway::failing());

    let response = AxumTestRequest::get("/motivation-quote")
        .send(app(&stub))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["quote"], FALLBACK_QUOTE);
}

// ============================================================================
// POST /generate-image
// ============================================================================

#[tokio::test]
async fn test_generate_image_returns_caption_and_photo_url() {
    let stub = Arc::new(StubGateway::succeeding());

    let response = AxumTestRequest::post("/generate-image")
        .json(&json!({ "prompt": "  overnight oats " }))
        .send(app(&stub))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["description"], "A bowl of oats topped with banana slices");
    assert_eq!(body["searchTerm"], "overnight oats");
    assert_eq!(
        body["imageUrl"],
        "https://source.unsplash.com/800x600/?overnight%20oats,fitness,food"
    );
}

#[tokio::test]
async fn test_generate_image_requires_prompt() {
    let stub = Arc::new(StubGateway::succeeding());

    for body in [json!({}), json!({ "prompt": "   " })] {
        let response = AxumTestRequest::post("/generate-image")
            .json(&body)
            .send(app(&stub))
            .await;
        assert_eq!(response.status(), 400);
        let body: Value = response.json();
        assert_eq!(body, json!({ "error": MISSING_PROMPT }));
    }
    assert_eq!(stub.image_calls(), 0);
}

#[tokio::test]
async fn test_generate_image_failure() {
    let stub = Arc::new(StubGateway::failing());

    let response = AxumTestRequest::post("/generate-image")
        .json(&json!({ "prompt": "salad" }))
        .send(app(&stub))
        .await;

    assert_eq!(response.status(), 500);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": IMAGE_GENERATION_FAILED }));
}

// ============================================================================
// Router behaviour
// ============================================================================

#[tokio::test]
async fn test_unknown_route_returns_not_found() {
    let stub = Arc::new(StubGateway::succeeding());

    let response = AxumTestRequest::get("/does-not-exist")
        .send(app(&stub))
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let stub = Arc::new(StubGateway::succeeding());

    let response = AxumTestRequest::get("/motivation-quote")
        .header("x-request-id", "trace-abc")
        .send(app(&stub))
        .await;

    assert_eq!(response.header("x-request-id"), Some("trace-abc"));
}

#[tokio::test]
async fn test_request_id_is_generated_when_absent() {
    let stub = Arc::new(StubGateway::succeeding());

    let response = AxumTestRequest::get("/motivation-quote")
        .send(app(&stub))
        .await;

    let id = response.header("x-request-id").expect("request id header");
    assert!(Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn test_cors_preflight_is_answered() {
    let stub = Arc::new(StubGateway::succeeding());

    let response = AxumTestRequest::options("/generate-plan")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send(app(&stub))
        .await;

    assert_eq!(response.status(), 200);
    assert!(response.header("access-control-allow-origin").is_some());
    assert_eq!(stub.plan_calls(), 0);
}
