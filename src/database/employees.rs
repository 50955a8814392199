// ABOUTME: Employee catalog storage operations
// ABOUTME: Tenant-scoped list/create/rename/delete with manual referential cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

use super::Database;
use crate::models::Employee;
use anyhow::Result;
use sqlx::Row;

impl Database {
    /// Create employees table
    pub(super) async fn migrate_employees(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                business_id INTEGER NOT NULL REFERENCES businesses(id),
                name TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_employees_business ON employees(business_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List a tenant's employees.
    pub async fn list_employees(&self, business_id: i64) -> Result<Vec<Employee>> {
        let rows = sqlx::query("SELECT id, business_id, name FROM employees WHERE business_id = ?")
            .bind(business_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(Employee {
                    id: row.try_get("id")?,
                    business_id: row.try_get("business_id")?,
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }

    /// Insert an employee; returns its id.
    pub async fn create_employee(&self, business_id: i64, name: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO employees (business_id, name) VALUES (?, ?)")
            .bind(business_id)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Rename an employee. Returns false when no owned row matched.
    pub async fn update_employee(&self, business_id: i64, id: i64, name: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE employees SET name = ? WHERE id = ? AND business_id = ?")
            .bind(name)
            .bind(id)
            .bind(business_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an employee along with its availability slots and service
    /// assignments, in one transaction. Historical appointments keep their
    /// employee_id. Returns false when no owned row matched.
    pub async fn delete_employee(&self, business_id: i64, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM availability_slots WHERE employee_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM employee_services WHERE employee_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM employees WHERE id = ? AND business_id = ?")
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

    /// Count a tenant's employees.
    pub async fn count_employees(&self, business_id: i64) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM employees WHERE business_id = ?")
            .bind(business_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }
}
