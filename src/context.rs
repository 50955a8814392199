// ABOUTME: Centralized resource container for dependency injection across routes
// ABOUTME: Holds the database handle, auth manager, notifier, and config behind Arcs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! # Server Resources
//!
//! Centralized resource container for dependency injection. Expensive shared
//! objects (database pool, auth manager) are constructed once at startup and
//! shared across handlers via `Arc` rather than being recreated per request.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::notifications::EmailNotifier;
use std::sync::Arc;

/// Shared state handed to every route handler
#[derive(Clone)]
pub struct ServerResources {
    pub database: Arc<Database>,
    pub auth_manager: Arc<AuthManager>,
    pub notifier: Arc<EmailNotifier>,
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        notifier: EmailNotifier,
        config: ServerConfig,
    ) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            notifier: Arc::new(notifier),
            config: Arc::new(config),
        }
    }
}
