// ABOUTME: Plan request/response pipeline from profile to stored plan
// ABOUTME: Prompt building, model gateway, reply normalization, session orchestration and storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! # Plan Pipeline
//!
//! Control flow for one request:
//!
//! 1. [`ProfileSubmission::validate`](crate::models::ProfileSubmission::validate)
//!    rejects incomplete input before any network call
//! 2. [`prompt::build_plan_prompt`] renders the profile and the expected JSON shape
//! 3. a [`PlanGateway`] performs exactly one model call
//! 4. [`normalizer::normalize_plan`] strips fences, parses and checks the plan
//! 5. [`PlanSession`] makes the pair current and mirrors it into a [`PlanStore`]

/// HTTP client for a running plan server
pub mod client;
/// Gateway trait and the provider-backed implementation
pub mod gateway;
/// Reply normalization
pub mod normalizer;
/// Prompt templates
pub mod prompt;
/// Session orchestration
pub mod session;
/// Persistence port
pub mod storage;

pub use client::HttpPlanClient;
pub use gateway::{quote_or_fallback, ImageCaption, ModelGateway, PlanGateway};
pub use session::{PlanSession, SessionPhase, SessionSignal};
pub use storage::{FilePlanStore, MemoryPlanStore, PlanStore, SavedSession};
