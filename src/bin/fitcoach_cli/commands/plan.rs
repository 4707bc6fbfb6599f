// ABOUTME: Plan lifecycle commands for fitcoach-cli
// ABOUTME: Handles generate, show, reset, quote and image operations against the session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

use fitcoach::{
    constants::messages::MISSING_PROMPT,
    errors::{AppError, AppResult, PlanError},
    export::image_url,
    models::ProfileSubmission,
    plans::SessionPhase,
};
use tracing::info;

use crate::helpers::display::{display_plan, display_profile, display_validation};
use crate::Session;

type Result<T> = AppResult<T>;

/// Generate a plan and save it
pub async fn generate(session: &mut Session, submission: ProfileSubmission) -> Result<()> {
    eprintln!("Generating your plan...");

    match session.request_plan(&submission).await {
        Ok(plan) => {
            display_plan(plan);
            Ok(())
        }
        Err(e @ PlanError::Validation { .. }) => {
            display_validation(&e);
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Print the saved profile and plan
pub async fn show(session: &mut Session) -> Result<()> {
    if session.load_persisted().await == SessionPhase::Empty {
        println!("No saved plan. Run `fitcoach-cli generate` first.");
        return Ok(());
    }
    if let (Some(profile), Some(plan)) = (session.profile(), session.plan()) {
        display_profile(profile);
        display_plan(plan);
    }
    Ok(())
}

/// Forget the saved plan
pub async fn reset(session: &mut Session) -> Result<()> {
    session.reset().await;
    info!("Session reset");
    println!("Saved plan cleared.");
    Ok(())
}

/// Print a motivational quote
pub async fn quote(session: &Session) -> Result<()> {
    println!("\"{}\"", session.request_motivation_quote().await);
    Ok(())
}

/// Describe an illustrative image for a subject
pub async fn image(session: &Session, subject: &str) -> Result<()> {
    if subject.trim().is_empty() {
        return Err(AppError::invalid_input(MISSING_PROMPT));
    }
    let caption = session.describe_image(subject).await?;
    println!("{}", caption.search_term);
    println!("{}", "=".repeat(60));
    println!("{}", caption.description);
    println!("\nPhoto: {}", image_url(&caption.search_term));
    Ok(())
}
