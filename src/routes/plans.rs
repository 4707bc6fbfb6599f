// ABOUTME: Plan route handlers: plan generation, motivation quote and image caption
// ABOUTME: Thin handlers mapping PlanGateway results onto fixed status codes and JSON bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! Plan routes
//!
//! | Route                    | Success                           | Failure                  |
//! |--------------------------|-----------------------------------|--------------------------|
//! | `POST /generate-plan`    | 200 plan                          | 400 / 500 `{error}`      |
//! | `GET /motivation-quote`  | 200 `{quote}`                     | never, falls back        |
//! | `POST /generate-image`   | 200 `{description, searchTerm, imageUrl}` | 400 / 500 `{error}` |
//!
//! Error bodies are fixed strings; upstream details only reach the log.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::constants::messages::{
    IMAGE_GENERATION_FAILED, MISSING_PROMPT, MISSING_REQUIRED_FIELDS, PLAN_GENERATION_FAILED,
};
use crate::errors::ErrorCode;
use crate::export::image_url;
use crate::middleware::RequestId;
use crate::models::ProfileSubmission;
use crate::plans::{quote_or_fallback, ImageCaption, PlanGateway};

/// Shared handler state
type GatewayState = Arc<dyn PlanGateway>;

/// Body of `POST /generate-image`
#[derive(Debug, Default, Deserialize)]
struct ImageRequest {
    #[serde(default)]
    prompt: Option<String>,
}

/// Reply of `POST /generate-image`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(flatten)]
    caption: ImageCaption,
    image_url: String,
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn request_id(extension: Option<&Extension<RequestId>>) -> &str {
    extension.map_or("-", |Extension(id)| id.as_str())
}

/// Plan routes implementation
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create the plan routes over a shared gateway
    pub fn routes(gateway: Arc<dyn PlanGateway>) -> Router {
        Router::new()
            .route("/generate-plan", post(Self::generate_plan))
            .route("/motivation-quote", get(Self::motivation_quote))
            .route("/generate-image", post(Self::generate_image))
            .with_state(gateway)
    }

    /// Validate the profile and generate a plan in one model call
    async fn generate_plan(
        State(gateway): State<GatewayState>,
        id: Option<Extension<RequestId>>,
        body: Result<Json<ProfileSubmission>, JsonRejection>,
    ) -> Response {
        let request_id = request_id(id.as_ref());
        let submission = match body {
            Ok(Json(submission)) => submission,
            Err(rejection) => {
                warn!(request_id, error = %rejection, "Unreadable plan request body");
                return error_body(StatusCode::BAD_REQUEST, MISSING_REQUIRED_FIELDS);
            }
        };

        let profile = match submission.validate() {
            Ok(profile) => profile,
            Err(e) => {
                if e.code() == ErrorCode::MissingRequiredField {
                    info!(request_id, error = %e, "Rejected incomplete profile");
                } else {
                    info!(request_id, error = %e, "Rejected invalid profile");
                }
                return error_body(StatusCode::BAD_REQUEST, MISSING_REQUIRED_FIELDS);
            }
        };

        match gateway.generate_plan(&profile).await {
            Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
            Err(e) => {
                warn!(request_id, error = %e, code = ?e.code(), "Plan generation failed");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, PLAN_GENERATION_FAILED)
            }
        }
    }

    /// One motivational quote; the fixed fallback when the model is unavailable
    async fn motivation_quote(State(gateway): State<GatewayState>) -> Response {
        let quote = quote_or_fallback(gateway.as_ref()).await;
        (StatusCode::OK, Json(json!({ "quote": quote }))).into_response()
    }

    /// Describe an illustrative image and point at a matching photo
    async fn generate_image(
        State(gateway): State<GatewayState>,
        id: Option<Extension<RequestId>>,
        body: Result<Json<ImageRequest>, JsonRejection>,
    ) -> Response {
        let request_id = request_id(id.as_ref());
        let subject = body
            .ok()
            .and_then(|Json(request)| request.prompt)
            .map(|prompt| prompt.trim().to_owned())
            .filter(|prompt| !prompt.is_empty());
        let Some(subject) = subject else {
            return error_body(StatusCode::BAD_REQUEST, MISSING_PROMPT);
        };

        match gateway.describe_image(&subject).await {
            Ok(caption) => {
                let image_url = image_url(&caption.search_term);
                (StatusCode::OK, Json(ImageResponse { caption, image_url })).into_response()
            }
            Err(e) => {
                warn!(request_id, error = %e, "Image description failed");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, IMAGE_GENERATION_FAILED)
            }
        }
    }
}
