// ABOUTME: Core types and constants for the fitcoach plan service
// ABOUTME: Foundation crate with error handling, the profile/plan data model, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

#![deny(unsafe_code)]

//! # Fitcoach Core
//!
//! Foundation crate shared by the plan server, the command-line client and
//! the tests. It changes rarely, which keeps incremental rebuilds of the
//! main crate cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the
//!   plan pipeline taxonomy `PlanError`
//! - **models**: The `Profile` a user submits and the `Plan` the model returns
//! - **constants**: Storage keys, model defaults and fixed user-facing strings

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Profile (input) and Plan (output) data model
pub mod models;

/// Application constants organized by domain
pub mod constants;
