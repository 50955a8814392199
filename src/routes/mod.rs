// ABOUTME: Route module organization for the Bookline HTTP API
// ABOUTME: Centralized route definitions organized by domain, assembled under /api
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Route modules.
//!
//! Each domain module holds its route definitions and thin handlers that
//! delegate to the database layer. [`router`] merges them all under `/api`
//! and applies the shared middleware stack.

/// Account profile and deletion routes
pub mod account;
/// Appointment scheduling routes
pub mod appointments;
/// Business registration and session routes
pub mod business;
/// Dashboard summary routes
pub mod dashboard;
/// Employee, schedule, and package routes
pub mod employees;
/// Health check routes
pub mod health;
/// Service catalog and assignment routes
pub mod services;

pub use account::AccountRoutes;
pub use appointments::AppointmentRoutes;
pub use business::BusinessRoutes;
pub use dashboard::DashboardRoutes;
pub use employees::EmployeeRoutes;
pub use health::HealthRoutes;
pub use services::ServiceRoutes;

use crate::context::ServerResources;
use crate::middleware::setup_cors;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Assemble the complete application router.
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    let api = Router::new()
        .merge(BusinessRoutes::routes(resources.clone()))
        .merge(AccountRoutes::routes(resources.clone()))
        .merge(EmployeeRoutes::routes(resources.clone()))
        .merge(ServiceRoutes::routes(resources.clone()))
        .merge(AppointmentRoutes::routes(resources.clone()))
        .merge(DashboardRoutes::routes(resources))
        .merge(HealthRoutes::routes());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(setup_cors())
}
