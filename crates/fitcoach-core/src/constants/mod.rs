// ABOUTME: Application constants shared by the server, the client and the tests
// ABOUTME: Model defaults, storage keys, plan shape and fixed user-facing strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! # Constants Module
//!
//! Hardcoded values grouped by the concern that owns them. Environment
//! lookups live in the main crate's configuration module, not here.

/// Hosted model defaults
pub mod llm {
    /// Model used for plans and quotes
    pub const DEFAULT_PLAN_MODEL: &str = "gemini-2.5-flash-lite";

    /// Model used for illustrative image captions
    pub const DEFAULT_IMAGE_MODEL: &str = "gemini-1.5-flash";

    /// Base URL of the Generative Language REST API
    pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Request timeout applied to every model call, in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
}

/// Shape of a generated plan
pub mod plan {
    /// Number of workout days a plan must contain
    pub const WORKOUT_DAYS: usize = 7;

    /// Returned when the quote call fails
    pub const FALLBACK_QUOTE: &str = "The only bad workout is the one that didn't happen!";
}

/// Keys of the client-side key/value store
pub mod storage {
    /// Entry holding the last serialized plan
    pub const PLAN_KEY: &str = "fitness_plan";

    /// Entry holding the last serialized profile
    pub const PROFILE_KEY: &str = "user_details";
}

/// Fixed bodies of the public HTTP surface
pub mod messages {
    /// 400 body for an incomplete profile
    pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";

    /// 500 body for any plan generation failure
    pub const PLAN_GENERATION_FAILED: &str = "Failed to generate fitness plan";

    /// 400 body for an empty image prompt
    pub const MISSING_PROMPT: &str = "Missing prompt";

    /// 500 body for an image caption failure
    pub const IMAGE_GENERATION_FAILED: &str = "Failed to generate image description";
}

/// Service identity used in logs
pub mod service_names {
    /// The HTTP plan server
    pub const FITCOACH_SERVER: &str = "fitcoach-server";

    /// The terminal client
    pub const FITCOACH_CLI: &str = "fitcoach-cli";
}
