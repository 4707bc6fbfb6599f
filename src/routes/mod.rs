// ABOUTME: Route module organization for the fitcoach HTTP endpoints
// ABOUTME: Assembles health and plan routes with request IDs, tracing, CORS and a body limit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! Route module for the plan server
//!
//! Each domain module contains only route definitions and thin handlers
//! that delegate to the plan pipeline.

/// Health check and readiness routes
pub mod health;
/// Plan generation, quote and image routes
pub mod plans;

use std::sync::Arc;

use axum::http::Uri;
use axum::{middleware, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub use health::HealthRoutes;
pub use plans::PlanRoutes;

use crate::errors::AppError;
use crate::middleware::{request_id_middleware, setup_cors};
use crate::plans::PlanGateway;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Full application router
///
/// `cors_allowed_origins` follows [`setup_cors`]: empty allows any origin.
pub fn router(gateway: Arc<dyn PlanGateway>, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(PlanRoutes::routes(gateway))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(setup_cors(cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("Route {}", uri.path()))
}
