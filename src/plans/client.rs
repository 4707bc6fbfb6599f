// ABOUTME: HTTP client for a running plan server, used by the terminal client
// ABOUTME: Implements PlanGateway over POST /generate-plan, GET /motivation-quote and POST /generate-image
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use super::gateway::{ImageCaption, PlanGateway};
use crate::constants::llm::DEFAULT_TIMEOUT_SECS;
use crate::errors::{AppError, AppResult, ErrorCode, PlanError};
use crate::models::{Plan, Profile};

/// Extra time on top of the server's own model timeout
const TIMEOUT_MARGIN_SECS: u64 = 15;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct QuoteBody {
    quote: String,
}

/// Gateway that delegates to a plan server over HTTP
#[derive(Debug, Clone)]
pub struct HttpPlanClient {
    base_url: String,
    client: Client,
}

impl HttpPlanClient {
    /// Client for the server at `base_url`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS + TIMEOUT_MARGIN_SECS))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client,
        })
    }

    /// Server root this client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn transport_error(error: &reqwest::Error) -> PlanError {
        PlanError::upstream(
            ErrorCode::ExternalServiceUnavailable,
            format!("plan server unreachable: {error}"),
        )
    }

    /// Decode a success body or turn the error body into a `PlanError`
    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, PlanError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Self::transport_error(&e))?;

        if status.is_success() {
            return serde_json::from_str(&text)
                .map_err(|e| PlanError::malformed(format!("unexpected server reply: {e}")));
        }

        let message = serde_json::from_str::<ErrorBody>(&text)
            .map_or(text, |body| body.error);
        debug!(status = %status, message = %message, "Plan server rejected request");

        if status == StatusCode::BAD_REQUEST {
            Err(PlanError::Validation {
                missing: Vec::new(),
                invalid: Vec::new(),
            })
        } else {
            Err(PlanError::upstream(
                ErrorCode::ExternalServiceError,
                format!("plan server returned {}: {message}", status.as_u16()),
            ))
        }
    }
}

#[async_trait]
impl PlanGateway for HttpPlanClient {
    #[instrument(skip_all, fields(server = %self.base_url))]
    async fn generate_plan(&self, profile: &Profile) -> Result<Plan, PlanError> {
        let response = self
            .client
            .post(self.url("/generate-plan"))
            .json(profile)
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;
        let plan: Plan = Self::read(response).await?;
        plan.check_shape().map_err(|problems| {
            PlanError::malformed(format!("plan failed shape checks: {}", problems.join("; ")))
        })?;
        Ok(plan)
    }

    #[instrument(skip_all, fields(server = %self.base_url))]
    async fn motivation_quote(&self) -> Result<String, PlanError> {
        let response = self
            .client
            .get(self.url("/motivation-quote"))
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;
        let body: QuoteBody = Self::read(response).await?;
        Ok(body.quote)
    }

    #[instrument(skip(self), fields(server = %self.base_url))]
    async fn describe_image(&self, subject: &str) -> Result<ImageCaption, PlanError> {
        let response = self
            .client
            .post(self.url("/generate-image"))
            .json(&json!({ "prompt": subject }))
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;
        Self::read(response).await
    }
}
