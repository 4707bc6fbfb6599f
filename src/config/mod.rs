// ABOUTME: Configuration management module for server and client settings
// ABOUTME: Environment-only configuration with typed values and fail-fast credential checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! Configuration module
//!
//! There are no configuration files. Every setting comes from the process
//! environment, and command-line flags override individual values.

/// Environment and server configuration
pub mod environment;

pub use environment::{Environment, LlmConfig, ServerConfig};
