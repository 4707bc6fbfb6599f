// ABOUTME: Environment configuration for the plan server
// ABOUTME: Reads the model credential, model names, timeout, listener and CORS settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! Environment-based configuration management

use std::env;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::env_vars;
use crate::constants::llm::{
    DEFAULT_IMAGE_MODEL, DEFAULT_PLAN_MODEL, DEFAULT_TIMEOUT_SECS, GEMINI_API_BASE_URL,
};
use crate::constants::network::{DEFAULT_HOST, DEFAULT_HTTP_PORT};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::llm::GeminiConfig;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Hosted model settings
#[derive(Clone)]
pub struct LlmConfig {
    /// Credential for the Generative Language API
    pub api_key: String,
    /// Model for plans and quotes
    pub plan_model: String,
    /// Model for image captions
    pub image_model: String,
    /// API root
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Defaults for every setting except the credential
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            plan_model: DEFAULT_PLAN_MODEL.to_owned(),
            image_model: DEFAULT_IMAGE_MODEL.to_owned(),
            base_url: GEMINI_API_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Provider settings for the plan model
    #[must_use]
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig::new(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_default_model(self.plan_model.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

impl Debug for LlmConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"[REDACTED]")
            .field("plan_model", &self.plan_model)
            .field("image_model", &self.image_model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listening port
    pub http_port: u16,
    /// HTTP listening address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Allowed CORS origins; empty means any origin
    pub cors_allowed_origins: Vec<String>,
    /// Hosted model settings
    pub llm: LlmConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigMissing` error when `GEMINI_API_KEY` is absent or
    /// empty, and a `ConfigError` when a numeric variable does not parse.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let api_key = env::var(env_vars::GEMINI_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ConfigMissing,
                    format!(
                        "{} environment variable not set",
                        env_vars::GEMINI_API_KEY
                    ),
                )
            })?;

        let llm = LlmConfig {
            api_key,
            plan_model: env_var_or(env_vars::GEMINI_MODEL, DEFAULT_PLAN_MODEL),
            image_model: env_var_or(env_vars::GEMINI_IMAGE_MODEL, DEFAULT_IMAGE_MODEL),
            base_url: env_var_or(env_vars::GEMINI_BASE_URL, GEMINI_API_BASE_URL),
            timeout_secs: parse_env(env_vars::LLM_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)?,
        };

        Ok(Self {
            http_port: parse_env(env_vars::HTTP_PORT, DEFAULT_HTTP_PORT)?,
            host: env_var_or(env_vars::HOST, DEFAULT_HOST),
            environment: Environment::from_str_or_default(&env_var_or(
                env_vars::ENVIRONMENT,
                "development",
            )),
            cors_allowed_origins: parse_origins(&env_var_or(
                env_vars::CORS_ALLOWED_ORIGINS,
                "*",
            )),
            llm,
        })
    }

    /// Socket address string the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Human-readable configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        let origins = if self.cors_allowed_origins.is_empty() {
            "any".to_owned()
        } else {
            self.cors_allowed_origins.join(", ")
        };
        format!(
            "Fitcoach Server Configuration:\n\
             - Listen: {}\n\
             - Environment: {}\n\
             - Plan Model: {}\n\
             - Image Model: {}\n\
             - Model Timeout: {}s\n\
             - CORS Origins: {origins}",
            self.bind_address(),
            self.environment,
            self.llm.plan_model,
            self.llm.image_model,
            self.llm.timeout_secs,
        )
    }
}

/// Read an environment variable, falling back when unset or empty
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Parse a numeric environment variable, falling back when unset
fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        _ => Ok(default),
    }
}

/// Parse comma-separated CORS origins; `*` means any
fn parse_origins(origins: &str) -> Vec<String> {
    if origins.trim() == "*" {
        return Vec::new();
    }
    origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
