// ABOUTME: Small shared helpers for datetime parsing and validation
// ABOUTME: Single choke point for converting client-supplied timestamps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Datetime parsing helpers.
//!
//! Every handler that accepts a client-supplied timestamp goes through
//! [`parse_datetime`] so parse failures map to one error shape instead of
//! ad hoc per-handler checks.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};

/// Parse an RFC 3339 timestamp into UTC.
///
/// # Errors
///
/// Returns `InvalidFormat` if the string is not a valid RFC 3339 datetime.
pub fn parse_datetime(field: &str, value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::invalid_format(format!("Invalid {field} datetime: {e}")))
}

/// Parse an optional RFC 3339 timestamp; `None` passes through.
///
/// # Errors
///
/// Returns `InvalidFormat` if a value is present but unparseable.
pub fn parse_optional_datetime(
    field: &str,
    value: Option<&str>,
) -> AppResult<Option<DateTime<Utc>>> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(Some(parse_datetime(field, v)?)),
        _ => Ok(None),
    }
}
