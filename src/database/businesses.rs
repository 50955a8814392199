// ABOUTME: Business (tenant) account storage operations
// ABOUTME: Registration, credential lookup, profile updates, reset tokens, cascade delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

use super::Database;
use crate::models::Business;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;

fn row_to_business(row: &sqlx::sqlite::SqliteRow) -> Result<Business> {
    Ok(Business {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
        category: row.try_get("category")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl Database {
    /// Create businesses table
    pub(super) async fn migrate_businesses(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS businesses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                phone TEXT NOT NULL,
                address TEXT NOT NULL,
                category TEXT NOT NULL,
                reset_token TEXT,
                reset_token_expiry TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_businesses_email ON businesses(email)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a new business account; returns its id.
    ///
    /// # Errors
    ///
    /// Fails if the email is already in use (unique constraint) or on store
    /// failure.
    pub async fn create_business(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        phone: &str,
        address: &str,
        category: &str,
    ) -> Result<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO businesses (name, email, password_hash, phone, address, category, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(phone)
        .bind(address)
        .bind(category)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Look up a business by its login email.
    pub async fn get_business_by_email(&self, email: &str) -> Result<Option<Business>> {
        let row = sqlx::query("SELECT * FROM businesses WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_business).transpose()
    }

    /// Look up a business by id.
    pub async fn get_business(&self, id: i64) -> Result<Option<Business>> {
        let row = sqlx::query("SELECT * FROM businesses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_business).transpose()
    }

    /// True if `email` is used by a business other than `exclude_id`.
    pub async fn email_taken_by_other(&self, email: &str, exclude_id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT id FROM businesses WHERE email = ? AND id != ?")
            .bind(email)
            .bind(exclude_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Update profile fields, and the password hash when one is supplied.
    pub async fn update_business_profile(
        &self,
        id: i64,
        name: &str,
        email: &str,
        phone: &str,
        address: &str,
        category: &str,
        password_hash: Option<&str>,
    ) -> Result<()> {
        match password_hash {
            Some(hash) => {
                sqlx::query(
                    r"
                    UPDATE businesses
                    SET name = ?, email = ?, phone = ?, address = ?, category = ?,
                        password_hash = ?, updated_at = ?
                    WHERE id = ?
                    ",
                )
                .bind(name)
                .bind(email)
                .bind(phone)
                .bind(address)
                .bind(category)
                .bind(hash)
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;
            }
            None => {
                sqlx::query(
                    r"
                    UPDATE businesses
                    SET name = ?, email = ?, phone = ?, address = ?, category = ?, updated_at = ?
                    WHERE id = ?
                    ",
                )
                .bind(name)
                .bind(email)
                .bind(phone)
                .bind(address)
                .bind(category)
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;
            }
        }
        Ok(())
    }

    /// Store a password-reset token with its expiry.
    pub async fn set_reset_token(
        &self,
        business_id: i64,
        token: &str,
        expiry: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query("UPDATE businesses SET reset_token = ?, reset_token_expiry = ? WHERE id = ?")
            .bind(token)
            .bind(expiry)
            .bind(business_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Find the business holding an unexpired reset token.
    pub async fn get_business_by_reset_token(&self, token: &str) -> Result<Option<i64>> {
        let row = sqlx::query(
            "SELECT id, reset_token_expiry FROM businesses WHERE reset_token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else { return Ok(None) };
        let expiry: Option<DateTime<Utc>> = row.try_get("reset_token_expiry")?;
        match expiry {
            Some(at) if at > Utc::now() => Ok(Some(row.try_get("id")?)),
            _ => Ok(None),
        }
    }

    /// Replace the password hash and clear any outstanding reset token.
    pub async fn reset_password(&self, business_id: i64, password_hash: &str) -> Result<()> {
        sqlx::query(
            r"
            UPDATE businesses
            SET password_hash = ?, reset_token = NULL, reset_token_expiry = NULL, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(password_hash)
        .bind(Utc::now())
        .bind(business_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete a business and everything it owns, in dependency order, inside
    /// one transaction. Returns false if the business did not exist.
    pub async fn delete_business_cascade(&self, business_id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM availability_slots WHERE employee_id IN \
             (SELECT id FROM employees WHERE business_id = ?)",
        )
        .bind(business_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM employee_services WHERE employee_id IN \
             (SELECT id FROM employees WHERE business_id = ?)",
        )
        .bind(business_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM appointments WHERE business_id = ?")
            .bind(business_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM employees WHERE business_id = ?")
            .bind(business_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM services WHERE business_id = ?")
            .bind(business_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM businesses WHERE id = ?")
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
}
