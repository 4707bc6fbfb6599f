// ABOUTME: Ways of presenting a finished plan outside the session
// ABOUTME: Read-aloud narration, printable page layout and illustrative photo URLs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

/// Printable page layout
pub mod document;
/// Photo URLs for exercises and meals
pub mod imagery;
/// Read-aloud scripts and narrator
pub mod narration;

pub use document::{DocumentLine, DocumentPage, LineStyle, PlanDocument};
pub use imagery::image_url;
pub use narration::{
    diet_script, workout_script, NarrationHandle, NarrationOutcome, Narrator, PlanSection,
    SpeechSink, Voice,
};
