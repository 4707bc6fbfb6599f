// ABOUTME: Tests for the error envelope and the plan pipeline error taxonomy
// ABOUTME: Checks status mapping, JSON codes, PlanError conversions and HTTP responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::error::Error;
use std::io;

use axum::body::to_bytes;
use axum::response::IntoResponse;
use fitcoach::errors::{AppError, ErrorCode, ErrorResponse, PlanError};
use serde_json::{json, Value};

#[test]
fn test_app_error_creation() {
    let error = AppError::not_found("Route /nowhere").with_request_id("req-123");

    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert_eq!(error.message, "Route /nowhere not found");
    assert_eq!(error.request_id.as_deref(), Some("req-123"));
    assert_eq!(error.http_status(), 404);
}

#[test]
fn test_error_response_serialization() {
    let error = AppError::invalid_input("age must be a number").with_request_id("req-9");

    let value = serde_json::to_value(ErrorResponse::from(error)).unwrap();

    assert_eq!(
        value,
        json!({
            "error": {
                "code": "INVALID_INPUT",
                "message": "age must be a number",
                "request_id": "req-9"
            }
        })
    );
}

#[test]
fn test_io_and_json_errors_keep_their_source() {
    let json_error = serde_json::from_str::<Value>("{").unwrap_err();
    let error = AppError::from(json_error);
    assert_eq!(error.code, ErrorCode::SerializationError);
    assert!(error.source().is_some());

    let io_error = io::Error::other("disk full");
    let error = AppError::from(io_error);
    assert_eq!(error.code, ErrorCode::StorageError);
    assert!(error.to_string().contains("disk full"));
}

#[test]
fn test_validation_error_lists_fields() {
    let error = PlanError::missing(vec!["name", "age"]);

    assert!(error.is_validation());
    assert_eq!(error.code(), ErrorCode::MissingRequiredField);
    assert_eq!(error.to_string(), "Missing required fields: name, age");

    let app = AppError::from(error);
    assert_eq!(app.http_status(), 400);
    assert_eq!(app.details, json!({ "missing": ["name", "age"], "invalid": [] }));
}

#[test]
fn test_invalid_only_validation() {
    let error = PlanError::Validation {
        missing: Vec::new(),
        invalid: vec!["fitnessGoal"],
    };

    assert_eq!(error.code(), ErrorCode::InvalidInput);
    assert_eq!(error.to_string(), "Invalid fields: fitnessGoal");
}

#[test]
fn test_app_error_maps_into_plan_error() {
    let config = PlanError::from(AppError::new(ErrorCode::ConfigMissing, "no key"));
    assert!(matches!(config, PlanError::Configuration { .. }));

    let malformed = PlanError::from(AppError::new(
        ErrorCode::ExternalMalformedResponse,
        "no candidates",
    ));
    assert!(matches!(malformed, PlanError::MalformedResponse { .. }));

    let throttled = PlanError::from(AppError::new(ErrorCode::ExternalRateLimited, "slow down"));
    assert_eq!(throttled.code(), ErrorCode::ExternalRateLimited);

    let internal = PlanError::from(AppError::internal("boom"));
    assert_eq!(internal.code(), ErrorCode::ExternalServiceError);
}

#[test]
fn test_plan_error_details_are_omitted_when_empty() {
    let app = AppError::from(PlanError::malformed("not JSON"));
    let value = serde_json::to_value(ErrorResponse::from(app)).unwrap();

    assert_eq!(value["error"]["code"], "EXTERNAL_MALFORMED_RESPONSE");
    assert!(value["error"].get("details").is_none());
}

#[tokio::test]
async fn test_into_response_uses_status_and_envelope() {
    let response = AppError::new(ErrorCode::ExternalServiceUnavailable, "timed out").into_response();

    assert_eq!(response.status().as_u16(), 502);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["error"]["code"], "EXTERNAL_SERVICE_UNAVAILABLE");
    assert_eq!(value["error"]["message"], "timed out");
}
