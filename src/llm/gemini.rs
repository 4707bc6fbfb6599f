// ABOUTME: Google Gemini provider over the Generative Language REST API
// ABOUTME: Single-attempt generateContent calls with timeout and upstream error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! The API key comes from `GEMINI_API_KEY` (see `config::environment`).
//! Base URL, default model and timeout are part of [`GeminiConfig`] so a
//! local stub server can stand in for the hosted API.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitcoach::errors::AppError;
//! use fitcoach::llm::{ChatRequest, GeminiConfig, GeminiProvider, LlmProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = GeminiProvider::new(GeminiConfig::new("my-key"))?;
//!     let response = provider.complete(&ChatRequest::prompt("Name one stretch.")).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, MessageRole, TokenUsage};
use crate::constants::llm::{DEFAULT_PLAN_MODEL, DEFAULT_TIMEOUT_SECS, GEMINI_API_BASE_URL};
use crate::errors::{AppError, AppResult, ErrorCode};

/// Service label used in error messages
const SERVICE: &str = "Gemini";

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// Configuration
// ============================================================================

/// Connection settings for [`GeminiProvider`]
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent in the `x-goog-api-key` header
    pub api_key: String,
    /// API root, without a trailing slash
    pub base_url: String,
    /// Model used when a request does not name one
    pub default_model: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Settings for the hosted API with default model and timeout
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: GEMINI_API_BASE_URL.to_owned(),
            default_model: DEFAULT_PLAN_MODEL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point the provider at another API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Set the default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Content structure for Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

/// Part of content; non-text parts deserialize with `text` absent
#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// Generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    candidate_count: u32,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

/// Usage metadata from Gemini API response
#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

/// API error response from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Create a provider from explicit settings
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key is empty or the HTTP
    /// client cannot be built.
    pub fn new(config: GeminiConfig) -> AppResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::new(
                ErrorCode::ConfigMissing,
                "Gemini API key is empty",
            ));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Settings this provider was built with
    #[must_use]
    pub const fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Convert our message role to Gemini's role format
    const fn convert_role(role: MessageRole) -> &'static str {
        match role {
            MessageRole::System | MessageRole::User => "user",
            MessageRole::Assistant => "model",
        }
    }

    /// Build the generateContent URL for a model
    fn build_url(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.config.base_url)
    }

    fn text_content(text: &str) -> GeminiContent {
        GeminiContent {
            role: None,
            parts: vec![ContentPart {
                text: Some(text.to_owned()),
            }],
        }
    }

    /// Convert chat messages to Gemini format, lifting system messages into
    /// the separate `systemInstruction` field
    fn convert_messages(messages: &[ChatMessage]) -> (Vec<GeminiContent>, Option<GeminiContent>) {
        let mut contents = Vec::new();
        let mut system_instruction = None;

        for message in messages {
            if message.role == MessageRole::System {
                system_instruction = Some(Self::text_content(&message.content));
            } else {
                let mut content = Self::text_content(&message.content);
                content.role = Some(Self::convert_role(message.role).to_owned());
                contents.push(content);
            }
        }

        (contents, system_instruction)
    }

    fn build_gemini_request(request: &ChatRequest) -> GeminiRequest {
        let (contents, system_instruction) = Self::convert_messages(&request.messages);

        let generation_config = if request.temperature.is_some() || request.max_tokens.is_some() {
            Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                candidate_count: 1,
            })
        } else {
            None
        };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    /// Concatenate the text parts of the first candidate
    fn extract_content(response: &GeminiResponse) -> AppResult<String> {
        let text: String = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::external_service(
                SERVICE,
                "No text content in response",
            ));
        }
        Ok(text)
    }

    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map a transport failure onto an upstream error
    ///
    /// The URL is dropped from the message so request details never reach logs.
    fn map_transport_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::external_unavailable(
                SERVICE,
                format!(
                    "request timed out after {} seconds",
                    self.config.timeout.as_secs()
                ),
            )
        } else {
            let error = error.without_url();
            AppError::external_unavailable(SERVICE, format!("HTTP request failed: {error}"))
        }
    }

    /// Map API error status to appropriate error type
    fn map_api_error(status: StatusCode, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            StatusCode::TOO_MANY_REQUESTS => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("{SERVICE} rejected the API key: {message}"),
            ),
            _ => AppError::external_service(
                SERVICE,
                format!("API error ({}): {message}", status.as_u16()),
            ),
        }
    }

    /// Turn "Please retry in 6.4s." into a whole-second hint
    fn extract_quota_message(message: &str) -> String {
        const PREFIX: &str = "Please retry in ";

        let seconds = message.find(PREFIX).and_then(|pos| {
            let rest = &message[pos + PREFIX.len()..];
            let end = rest.find('s')?;
            rest[..end].parse::<f64>().ok()
        });

        seconds.map_or_else(
            || "AI service quota exceeded. Please wait a moment and try again.".to_owned(),
            |s| {
                let whole = s.ceil();
                format!("AI service quota exceeded. Please try again in {whole:.0} seconds.")
            },
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.config.default_model);
        let url = self.build_url(model);
        let gemini_request = Self::build_gemini_request(request);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status, &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response envelope");
                AppError::external_service(SERVICE, format!("Unreadable response envelope: {e}"))
            })?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::external_service(SERVICE, error.message));
        }

        let content = Self::extract_content(&gemini_response)?;
        let usage = gemini_response
            .usage_metadata
            .as_ref()
            .map(Self::convert_usage);
        let finish_reason = gemini_response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.clone());

        debug!(chars = content.len(), "Received Gemini response");

        Ok(ChatResponse {
            content,
            model: model.to_owned(),
            usage,
            finish_reason,
        })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_message_rounds_up_retry_delay() {
        let message = "Quota exceeded for metric. Please retry in 6.406453963s.";
        assert_eq!(
            GeminiProvider::extract_quota_message(message),
            "AI service quota exceeded. Please try again in 7 seconds."
        );
    }

    #[test]
    fn test_quota_message_without_delay() {
        assert_eq!(
            GeminiProvider::extract_quota_message("Resource exhausted"),
            "AI service quota exceeded. Please wait a moment and try again."
        );
    }

    #[test]
    fn test_status_mapping() {
        let body = r#"{"error":{"message":"Please retry in 2s."}}"#;
        let limited = GeminiProvider::map_api_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(limited.code, ErrorCode::ExternalRateLimited);
        assert!(limited.message.contains("2 seconds"));

        let auth = GeminiProvider::map_api_error(StatusCode::FORBIDDEN, "denied");
        assert_eq!(auth.code, ErrorCode::ExternalAuthFailed);

        let other = GeminiProvider::map_api_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(other.code, ErrorCode::ExternalServiceError);
        assert!(other.message.contains("(500): boom"));
    }

    #[test]
    fn test_system_message_becomes_instruction() {
        let request = ChatRequest::new(vec![
            ChatMessage::system("You are a coach."),
            ChatMessage::user("Plan my week."),
        ])
        .with_temperature(0.4);
        let json = serde_json::to_value(GeminiProvider::build_gemini_request(&request)).unwrap();

        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "You are a coach.");
        assert_eq!(json["contents"].as_array().unwrap().len(), 1);
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["generationConfig"]["candidateCount"], 1);
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let err = GeminiProvider::new(GeminiConfig::new("  ")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissing);
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = GeminiProvider::new(GeminiConfig::new("secret-key")).unwrap();
        let rendered = format!("{provider:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("REDACTED"));
    }
}
