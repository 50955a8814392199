// ABOUTME: Per-employee weekly availability slot storage
// ABOUTME: Replace-on-write inside a transaction, grouped reads by day of week
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Availability storage.
//!
//! Writes are wholesale replace: all prior slots for an employee are deleted
//! and the new set inserted inside one transaction, so the set of slots for
//! one employee is atomic per write and never incrementally patched.

use super::Database;
use crate::models::AvailabilitySlot;
use anyhow::Result;
use sqlx::Row;
use std::collections::BTreeMap;

impl Database {
    /// Create availability_slots table
    pub(super) async fn migrate_availability(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS availability_slots (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                employee_id INTEGER NOT NULL REFERENCES employees(id),
                day_of_week INTEGER NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                is_available INTEGER NOT NULL DEFAULT 1
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_availability_employee \
             ON availability_slots(employee_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replace every slot for an employee with the given set, atomically.
    /// An empty set clears the schedule.
    pub async fn replace_availability(
        &self,
        employee_id: i64,
        slots: &[AvailabilitySlot],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM availability_slots WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        for slot in slots {
            sqlx::query(
                r"
                INSERT INTO availability_slots
                    (employee_id, day_of_week, start_time, end_time, is_available)
                VALUES (?, ?, ?, ?, ?)
                ",
            )
            .bind(employee_id)
            .bind(slot.day_of_week)
            .bind(&slot.start_time)
            .bind(&slot.end_time)
            .bind(slot.is_available)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Fetch an employee's slots as a day-of-week → ordered slots mapping.
    /// Returns an empty mapping when no slots exist.
    pub async fn get_availability(
        &self,
        employee_id: i64,
    ) -> Result<BTreeMap<i64, Vec<AvailabilitySlot>>> {
        let rows = sqlx::query(
            r"
            SELECT day_of_week, start_time, end_time, is_available
            FROM availability_slots
            WHERE employee_id = ?
            ORDER BY day_of_week, start_time
            ",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: BTreeMap<i64, Vec<AvailabilitySlot>> = BTreeMap::new();
        for row in &rows {
            let slot = AvailabilitySlot {
                day_of_week: row.try_get("day_of_week")?,
                start_time: row.try_get("start_time")?,
                end_time: row.try_get("end_time")?,
                is_available: row.try_get("is_available")?,
            };
            grouped.entry(slot.day_of_week).or_default().push(slot);
        }
        Ok(grouped)
    }
}
