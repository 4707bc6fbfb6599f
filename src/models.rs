// ABOUTME: Profile and plan data model re-exported from fitcoach-core
// ABOUTME: Keeps `fitcoach::models::*` paths stable for binaries and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

pub use fitcoach_core::models::*;
