// ABOUTME: Database management for the multi-tenant scheduling store
// ABOUTME: Owns the sqlite pool, schema migrations, and per-entity operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! # Database Management
//!
//! This module provides the relational store for the scheduling backend.
//! One [`Database`] handle wraps a shared connection pool; it is constructed
//! once at startup and passed around read-only (no module-level singletons).
//!
//! Every multi-statement sequence (the replace-on-write paths for
//! availability and assignments, and the cascading deletes) runs inside a
//! transaction, so a crash mid-sequence cannot leave a wiped set without its
//! replacement rows.

mod appointments;
mod assignments;
mod availability;
mod businesses;
mod employees;
mod guard;
mod services;

pub use guard::OwnedResource;

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for tenant, catalog, and appointment storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot connect or a migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
            && !database_url.contains('?')
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options).await?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails.
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_businesses().await?;
        self.migrate_employees().await?;
        self.migrate_services().await?;
        self.migrate_availability().await?;
        self.migrate_assignments().await?;
        self.migrate_appointments().await?;
        Ok(())
    }
}
