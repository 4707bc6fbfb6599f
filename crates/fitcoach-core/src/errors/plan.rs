// ABOUTME: Error taxonomy for the plan request/response pipeline
// ABOUTME: Validation, upstream, malformed-response and configuration failures with AppError conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

use serde_json::Value;

use super::{AppError, ErrorCode};

/// Failures of the plan pipeline.
///
/// Callers facing the end user collapse every variant into one generic
/// message; the variants exist for logs, tests and the command-line client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The profile is incomplete, detected before any network call
    #[error("{}", describe_validation(.missing, .invalid))]
    Validation {
        /// Wire names of required fields that are absent or empty
        missing: Vec<&'static str>,
        /// Wire names of fields holding an unknown value
        invalid: Vec<&'static str>,
    },

    /// The hosted model call failed, timed out or was unreachable
    #[error("Model call failed: {message}")]
    Upstream {
        /// Error code reported by the transport layer
        code: ErrorCode,
        /// Description of the failure
        message: String,
    },

    /// The model reply could not be turned into a plan
    #[error("Malformed model response: {reason}")]
    MalformedResponse {
        /// Why the reply was rejected
        reason: String,
    },

    /// The service was started without a usable credential
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the missing or invalid setting
        message: String,
    },
}

fn describe_validation(missing: &[&'static str], invalid: &[&'static str]) -> String {
    match (missing.is_empty(), invalid.is_empty()) {
        (false, true) => format!("Missing required fields: {}", missing.join(", ")),
        (true, false) => format!("Invalid fields: {}", invalid.join(", ")),
        (false, false) => format!(
            "Missing required fields: {}; invalid fields: {}",
            missing.join(", "),
            invalid.join(", ")
        ),
        (true, true) => "Profile failed validation".to_owned(),
    }
}

impl PlanError {
    /// Create a validation error for absent fields
    #[must_use]
    pub fn missing(fields: Vec<&'static str>) -> Self {
        Self::Validation {
            missing: fields,
            invalid: Vec::new(),
        }
    }

    /// Create a malformed-response error
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Create an upstream error
    #[must_use]
    pub fn upstream(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Upstream {
            code,
            message: message.into(),
        }
    }

    /// Whether the failure happened before contacting the model
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Error code this failure maps to
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { missing, .. } => {
                if missing.is_empty() {
                    ErrorCode::InvalidInput
                } else {
                    ErrorCode::MissingRequiredField
                }
            }
            Self::Upstream { code, .. } => *code,
            Self::MalformedResponse { .. } => ErrorCode::ExternalMalformedResponse,
            Self::Configuration { .. } => ErrorCode::ConfigMissing,
        }
    }
}

/// Any `AppError` raised below the pipeline is an upstream failure, except
/// configuration problems which keep their meaning.
impl From<AppError> for PlanError {
    fn from(error: AppError) -> Self {
        match error.code {
            ErrorCode::ConfigError | ErrorCode::ConfigMissing => Self::Configuration {
                message: error.message,
            },
            ErrorCode::ExternalMalformedResponse => Self::MalformedResponse {
                reason: error.message,
            },
            code if code.is_external() => Self::Upstream {
                code,
                message: error.message,
            },
            _ => Self::Upstream {
                code: ErrorCode::ExternalServiceError,
                message: error.to_string(),
            },
        }
    }
}

impl From<PlanError> for AppError {
    fn from(error: PlanError) -> Self {
        let code = error.code();
        let details = match &error {
            PlanError::Validation { missing, invalid } => serde_json::json!({
                "missing": missing,
                "invalid": invalid,
            }),
            _ => Value::Null,
        };
        Self::new(code, error.to_string()).with_details(details)
    }
}
