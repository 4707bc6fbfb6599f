// ABOUTME: Export commands for fitcoach-cli
// ABOUTME: Writes the printable layout to disk and narrates plan sections in the terminal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

use std::path::PathBuf;

use fitcoach::{
    errors::{AppError, AppResult},
    export::{NarrationOutcome, Narrator, PlanDocument, PlanSection},
    models::Plan,
    plans::SessionPhase,
};
use tokio::{fs, signal};
use tracing::{info, warn};

use crate::helpers::speech::TerminalSpeech;
use crate::Session;

type Result<T> = AppResult<T>;

async fn saved_plan(session: &mut Session) -> Result<()> {
    if session.load_persisted().await == SessionPhase::Empty {
        return Err(AppError::not_found("Saved plan"));
    }
    Ok(())
}

/// Write the printable layout of the saved plan
pub async fn document(session: &mut Session, output: Option<PathBuf>) -> Result<()> {
    saved_plan(session).await?;
    let (Some(profile), Some(plan)) = (session.profile(), session.plan()) else {
        return Err(AppError::not_found("Saved plan"));
    };

    let document = PlanDocument::layout(profile, plan);
    let dir = output.unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir).await?;
    let path = dir.join(document.file_name());
    fs::write(&path, document.render_text()).await?;

    info!(pages = document.pages().len(), path = %path.display(), "Plan exported");
    println!(
        "Saved {} page(s) to {}",
        document.pages().len(),
        path.display()
    );
    Ok(())
}

/// Read a section of the saved plan aloud until done or ctrl-c
pub async fn narrate(session: &mut Session, section: PlanSection, pace: f32) -> Result<()> {
    saved_plan(session).await?;
    let plan: Plan = session
        .plan()
        .cloned()
        .ok_or_else(|| AppError::not_found("Saved plan"))?;

    let narrator = Narrator::new(TerminalSpeech::new(pace));
    let handle = narrator.handle();
    let stopper = tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => handle.stop(),
            Err(e) => warn!(error = %e, "Cannot listen for ctrl-c"),
        }
    });

    let outcome = narrator.narrate_section(&plan, section).await;
    stopper.abort();

    match outcome? {
        NarrationOutcome::Completed => {}
        NarrationOutcome::Stopped => println!("\n[stopped]"),
    }
    Ok(())
}
