// ABOUTME: Helper modules for fitcoach-cli
// ABOUTME: Terminal output formatting and the printing speech sink
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

pub mod display;
pub mod speech;
