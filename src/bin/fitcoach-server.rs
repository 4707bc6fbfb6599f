// ABOUTME: HTTP server exposing plan generation, motivation quotes and image captions
// ABOUTME: Loads configuration from the environment and serves the router until ctrl-c
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! # Fitcoach Plan Server Binary
//!
//! Stateless: every request carries the full profile and each plan is
//! generated with one model call.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fitcoach::{
    config::ServerConfig,
    llm::GeminiProvider,
    logging::LoggingConfig,
    plans::{ModelGateway, PlanGateway},
    routes,
};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fitcoach-server")]
#[command(about = "Fitcoach - weekly workout and diet plans from a hosted language model")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    let mut logging = LoggingConfig::from_env();
    logging.environment = config.environment.to_string();
    logging.init()?;

    info!("Starting Fitcoach plan server");
    info!("{}", config.summary());

    let provider = GeminiProvider::new(config.llm.gemini())?;
    let gateway: Arc<dyn PlanGateway> =
        Arc::new(ModelGateway::new(provider).with_image_model(config.llm.image_model.clone()));

    let app = routes::router(gateway, &config.cors_allowed_origins);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(address = %address, "Listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
