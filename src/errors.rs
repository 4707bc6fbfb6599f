// ABOUTME: Unified error types re-exported from fitcoach-core
// ABOUTME: AppError, ErrorCode, ErrorResponse and the plan pipeline taxonomy PlanError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! Unified error handling system with standard error codes and HTTP responses

pub use fitcoach_core::errors::*;
