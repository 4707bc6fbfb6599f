// ABOUTME: Re-exports command modules for fitcoach-cli
// ABOUTME: Provides plan lifecycle and export commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

pub mod export;
pub mod plan;
