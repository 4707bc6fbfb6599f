// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Provides liveness and readiness endpoints reporting status and server time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! Health check routes for load balancers and process supervisors.
//!
//! The server holds no state beyond its configuration, so it is ready as
//! soon as it is listening.

use axum::routing::get;
use chrono::Utc;
use axum::{Json, Router};
use serde_json::{json, Value};

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes() -> Router {
        Router::new()
            .route("/health", get(|| Self::status("healthy")))
            .route("/ready", get(|| Self::status("ready")))
    }

    async fn status(status: &'static str) -> Json<Value> {
        Json(json!({
            "status": status,
            "timestamp": Utc::now().to_rfc3339()
        }))
    }
}
