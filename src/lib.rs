// ABOUTME: Main library entry point for the fitcoach plan service
// ABOUTME: Profile validation, model-generated weekly plans, persistence, export and HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

#![deny(unsafe_code)]

//! # Fitcoach
//!
//! Turns a user's physical profile and preferences into a seven-day workout
//! schedule, a four-meal diet plan, tips and a motivational line, using a
//! hosted language model.
//!
//! ## Features
//!
//! - **Profile validation**: incomplete profiles are rejected before any model call
//! - **One call per plan**: a single prompt carries the profile and the expected JSON shape
//! - **Tolerant parsing**: fenced or bare JSON replies, checked against the plan shape
//! - **Sessions**: the last profile/plan pair survives restarts
//! - **Export**: read-aloud scripts, printable layout and illustrative photos
//!
//! ## Architecture
//!
//! - **Models**: profile and plan data types (from `fitcoach-core`)
//! - **LLM**: provider trait and the Gemini REST client
//! - **Plans**: prompt builder, model gateway, normalizer, session and storage
//! - **Routes**: the HTTP surface served by `fitcoach-server`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitcoach::config::ServerConfig;
//! use fitcoach::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Plan server configured on {}", config.bind_address());
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Application constants and environment variable names
pub mod constants;

/// Unified error handling
pub mod errors;

/// Narration, printable layout and photo URLs for finished plans
pub mod export;

/// Language model providers
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Profile and plan data model
pub mod models;

/// Plan request pipeline and session
pub mod plans;

/// HTTP routes
pub mod routes;
