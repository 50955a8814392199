// ABOUTME: Main library entry point for the Bookline scheduling backend
// ABOUTME: Multi-tenant appointment scheduling API for small service businesses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

#![deny(unsafe_code)]

//! # Bookline
//!
//! A multi-tenant scheduling backend for small service businesses. Each
//! business account is a tenant owning its employees, service catalog,
//! weekly availability, employee-to-service assignments, and client
//! appointments.
//!
//! ## Architecture
//!
//! - **Auth**: HS256 JWT sessions binding a request to one tenant
//! - **Database**: SQLite via sqlx with per-entity operation modules
//! - **Guard**: ownership validation of every foreign id before a write
//! - **Routes**: axum routers per domain, merged under `/api`
//! - **Notifications**: fire-and-forget SMTP mail via lettre
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bookline::config::ServerConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! println!("Bookline configured with port: HTTP={}", config.http_port);
//! # Ok(())
//! # }
//! ```

/// JWT session management and password hashing
pub mod auth;

/// Environment-based configuration
pub mod config;

/// Shared resource container for dependency injection
pub mod context;

/// SQLite storage with per-entity operation modules
pub mod database;

/// Unified error handling with standard error codes
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (CORS)
pub mod middleware;

/// Domain models
pub mod models;

/// Outbound email notifications
pub mod notifications;

/// HTTP route handlers organized by domain
pub mod routes;

/// Shared datetime helpers
pub mod utils;
