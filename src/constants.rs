// ABOUTME: Application constants re-exported from fitcoach-core plus environment variable names
// ABOUTME: One place to look up every knob the server and the client read from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! Constants module

pub use fitcoach_core::constants::*;

/// Names of the environment variables read at startup
pub mod env_vars {
    /// Credential for the hosted model (required)
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Model used for plans and quotes
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// Model used for image captions
    pub const GEMINI_IMAGE_MODEL: &str = "GEMINI_IMAGE_MODEL";
    /// API root override, used by tests to target a stub
    pub const GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
    /// Per-request timeout in seconds
    pub const LLM_TIMEOUT_SECS: &str = "LLM_TIMEOUT_SECS";
    /// Listening port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Listening address
    pub const HOST: &str = "HOST";
    /// Comma-separated allowed origins, `*` for any
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Deployment environment name
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Base URL of a running plan server, read by the CLI
    pub const FITCOACH_SERVER_URL: &str = "FITCOACH_SERVER_URL";
    /// Directory for the CLI's saved plan
    pub const FITCOACH_DATA_DIR: &str = "FITCOACH_DATA_DIR";
}

/// Network defaults
pub mod network {
    /// Default listening port
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
    /// Default listening address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Server URL the CLI uses when none is configured
    pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
}
