// ABOUTME: Model gateway: the single boundary between the plan pipeline and the hosted model
// ABOUTME: PlanGateway trait plus the provider-backed implementation for plans, quotes and image captions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::normalizer::{normalize_plan, normalize_quote};
use super::prompt::{build_image_prompt, build_plan_prompt, QUOTE_PROMPT};
use crate::constants::llm::DEFAULT_IMAGE_MODEL;
use crate::constants::plan::FALLBACK_QUOTE;
use crate::errors::PlanError;
use crate::llm::{ChatRequest, LlmProvider};
use crate::models::{Plan, Profile};

/// Caption for an illustrative image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCaption {
    /// Visual description written by the model
    pub description: String,
    /// Subject the caption was requested for, usable as a photo search term
    pub search_term: String,
}

/// Operations the plan session needs from the model side.
///
/// Each call is one round trip and a failure propagates immediately.
#[async_trait]
pub trait PlanGateway: Send + Sync {
    /// Generate and normalize a full plan for a complete profile
    ///
    /// # Errors
    ///
    /// `Upstream` when the call fails, `MalformedResponse` when the reply is
    /// not a well-formed plan.
    async fn generate_plan(&self, profile: &Profile) -> Result<Plan, PlanError>;

    /// Generate a short motivational quote
    ///
    /// # Errors
    ///
    /// `Upstream` when the call fails, `MalformedResponse` for an empty reply.
    async fn motivation_quote(&self) -> Result<String, PlanError>;

    /// Describe an illustrative image for a subject
    ///
    /// # Errors
    ///
    /// `Upstream` when the call fails, `MalformedResponse` for an empty reply.
    async fn describe_image(&self, subject: &str) -> Result<ImageCaption, PlanError>;
}

/// Quote from the gateway, or the fixed fallback when the call fails
pub async fn quote_or_fallback(gateway: &dyn PlanGateway) -> String {
    match gateway.motivation_quote().await {
        Ok(quote) => quote,
        Err(e) => {
            warn!(error = %e, "Motivation quote unavailable, using fallback");
            FALLBACK_QUOTE.to_owned()
        }
    }
}

/// Gateway backed by an [`LlmProvider`]
#[derive(Debug)]
pub struct ModelGateway<P> {
    provider: P,
    image_model: String,
}

impl<P: LlmProvider> ModelGateway<P> {
    /// Gateway using the provider's default model for plans and quotes
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            image_model: DEFAULT_IMAGE_MODEL.to_owned(),
        }
    }

    /// Set the model used for image captions
    #[must_use]
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// The wrapped provider
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    async fn complete_text(&self, request: &ChatRequest) -> Result<String, PlanError> {
        let response = self.provider.complete(request).await?;
        Ok(response.content)
    }
}

#[async_trait]
impl<P: LlmProvider> PlanGateway for ModelGateway<P> {
    #[instrument(skip_all, fields(
        provider = self.provider.name(),
        goal = %profile.fitness_goal,
        level = %profile.fitness_level,
    ))]
    async fn generate_plan(&self, profile: &Profile) -> Result<Plan, PlanError> {
        let request = ChatRequest::prompt(build_plan_prompt(profile));
        let reply = self.complete_text(&request).await?;
        let plan = normalize_plan(&reply)?;
        info!(
            days = plan.workout_plan.len(),
            exercises = plan.exercise_count(),
            "Plan generated"
        );
        Ok(plan)
    }

    #[instrument(skip_all, fields(provider = self.provider.name()))]
    async fn motivation_quote(&self) -> Result<String, PlanError> {
        let reply = self.complete_text(&ChatRequest::prompt(QUOTE_PROMPT)).await?;
        let quote = normalize_quote(&reply);
        if quote.is_empty() {
            return Err(PlanError::malformed("quote reply is empty"));
        }
        Ok(quote)
    }

    #[instrument(skip(self), fields(provider = self.provider.name(), model = %self.image_model))]
    async fn describe_image(&self, subject: &str) -> Result<ImageCaption, PlanError> {
        let request =
            ChatRequest::prompt(build_image_prompt(subject)).with_model(self.image_model.clone());
        let description = self.complete_text(&request).await?.trim().to_owned();
        if description.is_empty() {
            return Err(PlanError::malformed("image description is empty"));
        }
        Ok(ImageCaption {
            description,
            search_term: subject.trim().to_owned(),
        })
    }
}
