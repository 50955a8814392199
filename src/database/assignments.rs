// ABOUTME: Employee-to-service assignment pair storage
// ABOUTME: Transactional replace-on-write from either side of the relation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Employee/service assignment storage.
//!
//! The relation is symmetric and replace-on-write from either side: writing
//! an employee's service list clears only that employee's rows, writing a
//! service's employee list clears only that service's rows. Duplicate pairs
//! in the input collapse silently via the unique constraint.

use super::Database;
use anyhow::Result;
use sqlx::Row;

impl Database {
    /// Create employee_services table
    pub(super) async fn migrate_assignments(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS employee_services (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                employee_id INTEGER NOT NULL REFERENCES employees(id),
                service_id INTEGER NOT NULL REFERENCES services(id),
                UNIQUE(employee_id, service_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_employee_services_service \
             ON employee_services(service_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replace the set of services an employee performs, atomically.
    pub async fn replace_services_for_employee(
        &self,
        employee_id: i64,
        service_ids: &[i64],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM employee_services WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        for service_id in service_ids {
            sqlx::query(
                "INSERT OR IGNORE INTO employee_services (employee_id, service_id) VALUES (?, ?)",
            )
            .bind(employee_id)
            .bind(service_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Replace the set of employees assigned to a service, atomically.
    pub async fn replace_employees_for_service(
        &self,
        service_id: i64,
        employee_ids: &[i64],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM employee_services WHERE service_id = ?")
            .bind(service_id)
            .execute(&mut *tx)
            .await?;

        for employee_id in employee_ids {
            sqlx::query(
                "INSERT OR IGNORE INTO employee_services (employee_id, service_id) VALUES (?, ?)",
            )
            .bind(employee_id)
            .bind(service_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Ids of the services an employee performs.
    pub async fn list_services_for_employee(&self, employee_id: i64) -> Result<Vec<i64>> {
        let rows = sqlx::query(
            "SELECT service_id FROM employee_services WHERE employee_id = ? ORDER BY service_id",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Ok(row.try_get("service_id")?))
            .collect()
    }

    /// Ids of the employees assigned to a service.
    pub async fn list_employees_for_service(&self, service_id: i64) -> Result<Vec<i64>> {
        let rows = sqlx::query(
            "SELECT employee_id FROM employee_services WHERE service_id = ? ORDER BY employee_id",
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Ok(row.try_get("employee_id")?))
            .collect()
    }
}
