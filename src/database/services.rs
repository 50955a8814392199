// ABOUTME: Service catalog storage operations
// ABOUTME: Tenant-scoped list/create/update/delete with assignment cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

use super::Database;
use crate::models::{Service, ServiceWithAssignments};
use anyhow::Result;
use sqlx::Row;
use std::collections::HashMap;

impl Database {
    /// Create services table
    pub(super) async fn migrate_services(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS services (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                business_id INTEGER NOT NULL REFERENCES businesses(id),
                title TEXT NOT NULL,
                price REAL NOT NULL,
                duration INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_services_business ON services(business_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List a tenant's services with the employee ids assigned to each.
    ///
    /// Assignments come back in one joined query rather than one query per
    /// service, then get grouped by service id in memory.
    pub async fn list_services_with_assignments(
        &self,
        business_id: i64,
    ) -> Result<Vec<ServiceWithAssignments>> {
        let rows = sqlx::query(
            "SELECT id, business_id, title, price, duration FROM services WHERE business_id = ?",
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        let assignment_rows = sqlx::query(
            "SELECT es.service_id, es.employee_id FROM employee_services es \
             JOIN services s ON s.id = es.service_id \
             WHERE s.business_id = ? \
             ORDER BY es.service_id, es.employee_id",
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        let mut by_service: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in &assignment_rows {
            let service_id: i64 = row.try_get("service_id")?;
            let employee_id: i64 = row.try_get("employee_id")?;
            by_service.entry(service_id).or_default().push(employee_id);
        }

        let mut services = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: i64 = row.try_get("id")?;
            services.push(ServiceWithAssignments {
                id,
                business_id: row.try_get("business_id")?,
                title: row.try_get("title")?,
                price: row.try_get("price")?,
                duration: row.try_get("duration")?,
                assigned_employee_ids: by_service.remove(&id).unwrap_or_default(),
            });
        }
        Ok(services)
    }

    /// Fetch one owned service.
    pub async fn get_service(&self, business_id: i64, id: i64) -> Result<Option<Service>> {
        let row = sqlx::query(
            "SELECT id, business_id, title, price, duration FROM services \
             WHERE id = ? AND business_id = ?",
        )
        .bind(id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(Service {
                id: row.try_get("id")?,
                business_id: row.try_get("business_id")?,
                title: row.try_get("title")?,
                price: row.try_get("price")?,
                duration: row.try_get("duration")?,
            })
        })
        .transpose()
    }

    /// Insert a service; returns its id.
    pub async fn create_service(
        &self,
        business_id: i64,
        title: &str,
        price: f64,
        duration: i64,
    ) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO services (business_id, title, price, duration) VALUES (?, ?, ?, ?)",
        )
        .bind(business_id)
        .bind(title)
        .bind(price)
        .bind(duration)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Full-replace update of a service. Returns false when no owned row
    /// matched.
    pub async fn update_service(
        &self,
        business_id: i64,
        id: i64,
        title: &str,
        price: f64,
        duration: i64,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE services SET title = ?, price = ?, duration = ? \
             WHERE id = ? AND business_id = ?",
        )
        .bind(title)
        .bind(price)
        .bind(duration)
        .bind(id)
        .bind(business_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a service and its assignment rows in one transaction.
    /// Returns false when no owned row matched.
    pub async fn delete_service(&self, business_id: i64, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM employee_services WHERE service_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM services WHERE id = ? AND business_id = ?")
            .bind(id)
            .bind(business_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Count a tenant's services.
    pub async fn count_services(&self, business_id: i64) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM services WHERE business_id = ?")
            .bind(business_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }
}
