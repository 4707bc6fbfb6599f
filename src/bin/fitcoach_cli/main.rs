// ABOUTME: Fitcoach CLI - terminal client for a running plan server
// ABOUTME: Generates, shows, resets, exports and narrates the locally saved plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors
//!
//! Usage:
//! ```bash
//! # Generate a plan (the server must be running)
//! fitcoach-cli generate --name Ana --age 30 --gender female --height 165 --weight 60 \
//!     --goal weight-loss --level beginner --location home --diet vegetarian
//!
//! # Show the saved plan
//! fitcoach-cli show
//!
//! # Save a printable copy
//! fitcoach-cli export --output ./plans
//!
//! # Read the workout aloud (ctrl-c stops)
//! fitcoach-cli narrate workout
//!
//! # Forget the saved plan
//! fitcoach-cli reset
//! ```

mod commands;
mod helpers;

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use fitcoach::{
    constants::{env_vars, network::DEFAULT_SERVER_URL},
    errors::{AppError, AppResult},
    export::PlanSection,
    logging::LoggingConfig,
    models::ProfileSubmission,
    plans::{FilePlanStore, HttpPlanClient, PlanSession},
};
use tracing::debug;

type Result<T> = AppResult<T>;

/// Session used by every command
pub type Session = PlanSession<HttpPlanClient, FilePlanStore>;

#[derive(Parser)]
#[command(
    name = "fitcoach-cli",
    about = "Fitcoach terminal client",
    long_about = "Request weekly workout and diet plans from a fitcoach server and keep the last one on disk."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Plan server URL (default: $FITCOACH_SERVER_URL or http://127.0.0.1:3000)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Directory holding the saved plan (default: $FITCOACH_DATA_DIR or the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Generate a new plan from a profile
    Generate(ProfileArgs),

    /// Show the saved plan
    Show,

    /// Forget the saved plan
    Reset,

    /// Print a motivational quote
    Quote,

    /// Save a printable copy of the saved plan
    Export {
        /// Directory to write into (default: current directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Read part of the saved plan aloud
    Narrate {
        /// Section to read
        #[arg(value_enum)]
        section: SectionArg,

        /// Pause multiplier between sentences, 0 prints without pausing
        #[arg(long, default_value = "1.0")]
        pace: f32,
    },

    /// Describe an illustrative image for an exercise or meal
    Image {
        /// Exercise or meal name
        subject: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SectionArg {
    Workout,
    Diet,
}

impl From<SectionArg> for PlanSection {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Workout => Self::Workout,
            SectionArg::Diet => Self::Diet,
        }
    }
}

/// Profile flags; completeness is checked by the session
#[derive(clap::Args)]
struct ProfileArgs {
    /// Display name
    #[arg(long)]
    name: Option<String>,

    /// Age in years
    #[arg(long)]
    age: Option<u32>,

    /// male, female or other
    #[arg(long)]
    gender: Option<String>,

    /// Height in centimetres
    #[arg(long)]
    height: Option<f64>,

    /// Weight in kilograms
    #[arg(long)]
    weight: Option<f64>,

    /// weight-loss, muscle-gain, maintenance or endurance
    #[arg(long)]
    goal: Option<String>,

    /// beginner, intermediate or advanced
    #[arg(long)]
    level: Option<String>,

    /// home, gym or outdoor
    #[arg(long)]
    location: Option<String>,

    /// vegetarian, non-vegetarian, vegan or keto
    #[arg(long)]
    diet: Option<String>,

    /// Relevant medical history
    #[arg(long)]
    medical_history: Option<String>,

    /// low, medium or high
    #[arg(long)]
    stress: Option<String>,
}

impl From<ProfileArgs> for ProfileSubmission {
    fn from(args: ProfileArgs) -> Self {
        Self {
            name: args.name,
            age: args.age,
            gender: args.gender,
            height: args.height,
            weight: args.weight,
            fitness_goal: args.goal,
            fitness_level: args.level,
            workout_location: args.location,
            dietary_preference: args.diet,
            medical_history: args.medical_history,
            stress_level: args.stress,
        }
    }
}

fn build_session(server: Option<String>, data_dir: Option<PathBuf>) -> Result<Session> {
    let server = server
        .or_else(|| env::var(env_vars::FITCOACH_SERVER_URL).ok())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_owned());
    let store = match data_dir.or_else(|| env::var_os(env_vars::FITCOACH_DATA_DIR).map(PathBuf::from)) {
        Some(dir) => FilePlanStore::new(dir),
        None => FilePlanStore::default_location()?,
    };
    debug!(server = %server, data_dir = %store.dir().display(), "Client configured");

    Ok(PlanSession::new(HttpPlanClient::new(server)?, store))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose)
        .init()
        .map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

    let mut session = build_session(cli.server, cli.data_dir)?;

    match cli.command {
        Command::Generate(profile) => commands::plan::generate(&mut session, profile.into()).await,
        Command::Show => commands::plan::show(&mut session).await,
        Command::Reset => commands::plan::reset(&mut session).await,
        Command::Quote => commands::plan::quote(&session).await,
        Command::Image { subject } => commands::plan::image(&session, &subject).await,
        Command::Export { output } => commands::export::document(&mut session, output).await,
        Command::Narrate { section, pace } => {
            commands::export::narrate(&mut session, section.into(), pace).await
        }
    }
}
