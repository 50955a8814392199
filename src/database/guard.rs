// ABOUTME: Tenant-scoped resource guard applied before every foreign-id write
// ABOUTME: Nonexistent and foreign-tenant ids are deliberately indistinguishable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Tenant-scoped resource guard.
//!
//! Every handler that accepts a foreign id referencing an employee, service,
//! or appointment calls [`Database::assert_owned`] before using that id in a
//! write. An id belonging to a different tenant and a nonexistent id produce
//! the same `ResourceNotFound` outcome, so callers cannot fish for the
//! existence of other tenants' resources.

use super::Database;
use crate::errors::{AppError, AppResult};

/// Tables subject to ownership validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedResource {
    Employee,
    Service,
    Appointment,
}

impl OwnedResource {
    const fn table(self) -> &'static str {
        match self {
            Self::Employee => "employees",
            Self::Service => "services",
            Self::Appointment => "appointments",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Service => "Service",
            Self::Appointment => "Appointment",
        }
    }
}

impl Database {
    /// Assert that `id` exists in the given table and belongs to
    /// `business_id`.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the row is absent or owned by another
    /// tenant, and `DatabaseError` on store failure.
    pub async fn assert_owned(
        &self,
        resource: OwnedResource,
        id: i64,
        business_id: i64,
    ) -> AppResult<()> {
        let query = format!(
            "SELECT id FROM {} WHERE id = ? AND business_id = ?",
            resource.table()
        );
        let row = sqlx::query(&query)
            .bind(id)
            .bind(business_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("{} {id}", resource.label()))),
        }
    }

    /// Assert ownership for a whole set of ids; if even one fails, the
    /// operation is rejected before any write happens.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for the first id that is absent or foreign.
    pub async fn assert_all_owned(
        &self,
        resource: OwnedResource,
        ids: &[i64],
        business_id: i64,
    ) -> AppResult<()> {
        for id in ids {
            self.assert_owned(resource, *id, business_id).await?;
        }
        Ok(())
    }
}
