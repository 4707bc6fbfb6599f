// ABOUTME: Turns raw model completions into typed values
// ABOUTME: Fence stripping, JSON parsing and shape checks for plans; cleanup for quotes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

use std::sync::LazyLock;

use regex::Regex;
use serde_json::error::Category;
use tracing::debug;

use crate::errors::PlanError;
use crate::models::Plan;

/// Fenced block tagged as JSON
static JSON_FENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"```json\r?\n([\s\S]*?)\r?\n```").ok());

/// Untagged fenced block
static PLAIN_FENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"```\r?\n([\s\S]*?)\r?\n```").ok());

fn fenced<'a>(pattern: &LazyLock<Option<Regex>>, reply: &'a str) -> Option<&'a str> {
    pattern
        .as_ref()?
        .captures(reply)?
        .get(1)
        .map(|m| m.as_str())
}

/// Select the text that should hold the JSON payload.
///
/// A `json`-tagged fence wins over an untagged one; without a fence the
/// whole reply is used. The result is trimmed.
#[must_use]
pub fn extract_payload(reply: &str) -> &str {
    fenced(&JSON_FENCE, reply)
        .or_else(|| fenced(&PLAIN_FENCE, reply))
        .unwrap_or(reply)
        .trim()
}

/// Parse a plan completion.
///
/// # Errors
///
/// Returns [`PlanError::MalformedResponse`] when the payload is not JSON,
/// is JSON of the wrong shape, or fails the structural plan checks.
pub fn normalize_plan(reply: &str) -> Result<Plan, PlanError> {
    let payload = extract_payload(reply);
    if payload.is_empty() {
        return Err(PlanError::malformed("reply is empty"));
    }

    let plan: Plan = serde_json::from_str(payload).map_err(|e| {
        debug!(error = %e, "Rejected plan payload");
        match e.classify() {
            Category::Data => PlanError::malformed(format!("JSON does not match the plan shape: {e}")),
            Category::Syntax | Category::Eof | Category::Io => {
                PlanError::malformed(format!("reply is not valid JSON: {e}"))
            }
        }
    })?;

    plan.check_shape().map_err(|problems| {
        PlanError::malformed(format!("plan failed shape checks: {}", problems.join("; ")))
    })?;

    Ok(plan)
}

/// Clean a quote completion: trim and drop every quote character
#[must_use]
pub fn normalize_quote(reply: &str) -> String {
    reply.trim().replace(['\'', '"'], "")
}
