// ABOUTME: Appointment storage operations
// ABOUTME: Joined listing, create/update/delete, bulk purge, today view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Appointment storage.
//!
//! Listings join employees and services with LEFT JOIN so appointments whose
//! employee or service was since deleted still appear, with the display
//! fields null.

use super::Database;
use crate::models::AppointmentDetails;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;

fn row_to_details(row: &sqlx::sqlite::SqliteRow) -> Result<AppointmentDetails> {
    Ok(AppointmentDetails {
        id: row.try_get("id")?,
        business_id: row.try_get("business_id")?,
        employee_id: row.try_get("employee_id")?,
        employee_name: row.try_get("employee_name")?,
        service_id: row.try_get("service_id")?,
        service_title: row.try_get("service_title")?,
        service_duration: row.try_get("service_duration")?,
        client_name: row.try_get("client_name")?,
        client_contact: row.try_get("client_contact")?,
        start_at: row.try_get("start_at")?,
        end_at: row.try_get("end_at")?,
        status: row.try_get("status")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

const DETAILS_SELECT: &str = r"
    SELECT a.id, a.business_id, a.employee_id, a.service_id,
           a.client_name, a.client_contact, a.start_at, a.end_at,
           a.status, a.notes, a.created_at, a.updated_at,
           e.name AS employee_name,
           s.title AS service_title,
           s.duration AS service_duration
    FROM appointments a
    LEFT JOIN employees e ON e.id = a.employee_id
    LEFT JOIN services s ON s.id = a.service_id
";

impl Database {
    /// Create appointments table
    pub(super) async fn migrate_appointments(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS appointments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                business_id INTEGER NOT NULL REFERENCES businesses(id),
                employee_id INTEGER NOT NULL,
                service_id INTEGER NOT NULL,
                client_name TEXT NOT NULL,
                client_contact TEXT,
                start_at TEXT NOT NULL,
                end_at TEXT,
                status TEXT NOT NULL,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_appointments_business_start \
             ON appointments(business_id, start_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List a tenant's appointments with display fields, soonest first.
    pub async fn list_appointments(&self, business_id: i64) -> Result<Vec<AppointmentDetails>> {
        let query = format!("{DETAILS_SELECT} WHERE a.business_id = ? ORDER BY a.start_at ASC");
        let rows = sqlx::query(&query)
            .bind(business_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_details).collect()
    }

    /// Fetch one owned appointment with display fields.
    pub async fn get_appointment(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<AppointmentDetails>> {
        let query = format!("{DETAILS_SELECT} WHERE a.id = ? AND a.business_id = ?");
        let row = sqlx::query(&query)
            .bind(id)
            .bind(business_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_details).transpose()
    }

    /// Insert an appointment; returns its id.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_appointment(
        &self,
        business_id: i64,
        employee_id: i64,
        service_id: i64,
        client_name: &str,
        client_contact: Option<&str>,
        start_at: DateTime<Utc>,
        end_at: Option<DateTime<Utc>>,
        status: &str,
        notes: Option<&str>,
    ) -> Result<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO appointments
                (business_id, employee_id, service_id, client_name, client_contact,
                 start_at, end_at, status, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(business_id)
        .bind(employee_id)
        .bind(service_id)
        .bind(client_name)
        .bind(client_contact)
        .bind(start_at)
        .bind(end_at)
        .bind(status)
        .bind(notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Full-replace update of an owned appointment. Returns false when no
    /// owned row matched.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_appointment(
        &self,
        business_id: i64,
        id: i64,
        employee_id: i64,
        service_id: i64,
        client_name: &str,
        client_contact: Option<&str>,
        start_at: DateTime<Utc>,
        end_at: Option<DateTime<Utc>>,
        status: &str,
        notes: Option<&str>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE appointments
            SET employee_id = ?, service_id = ?, client_name = ?, client_contact = ?,
                start_at = ?, end_at = ?, status = ?, notes = ?, updated_at = ?
            WHERE id = ? AND business_id = ?
            ",
        )
        .bind(employee_id)
        .bind(service_id)
        .bind(client_name)
        .bind(client_contact)
        .bind(start_at)
        .bind(end_at)
        .bind(status)
        .bind(notes)
        .bind(Utc::now())
        .bind(id)
        .bind(business_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete one owned appointment. Returns false when no owned row matched.
    pub async fn delete_appointment(&self, business_id: i64, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ? AND business_id = ?")
            .bind(id)
            .bind(business_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Purge a tenant's appointments that start before the cutoff; returns
    /// how many were deleted.
    pub async fn delete_appointments_before(
        &self,
        business_id: i64,
        cutoff: DateTime<Utc>,
    ) -> Result<u64> {
        let result = sqlx::query("DELETE FROM appointments WHERE business_id = ? AND start_at < ?")
            .bind(business_id)
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// A tenant's appointments within the given window, soonest first.
    /// The dashboard uses this with a midnight-to-midnight UTC window.
    pub async fn list_appointments_between(
        &self,
        business_id: i64,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<AppointmentDetails>> {
        let query = format!(
            "{DETAILS_SELECT} WHERE a.business_id = ? AND a.start_at >= ? AND a.start_at < ? \
             ORDER BY a.start_at ASC"
        );
        let rows = sqlx::query(&query)
            .bind(business_id)
            .bind(from)
            .bind(until)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_details).collect()
    }
}
