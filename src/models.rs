// ABOUTME: Core domain entities for the scheduling backend
// ABOUTME: Business (tenant), Employee, Service, AvailabilitySlot, Appointment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Domain models.
//!
//! Every entity below the tenant carries a `business_id` owner column; no
//! entity outlives its business. Wire representations use camelCase to match
//! the public API contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A business account, the unit of data isolation (tenant).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: i64,
    pub name: String,
    /// Unique across all tenants; doubles as the login identifier.
    pub email: String,
    /// bcrypt hash, never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: String,
    pub address: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An employee owned by one business.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub business_id: i64,
    pub name: String,
}

/// A bookable service owned by one business.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub business_id: i64,
    pub title: String,
    /// Positive decimal price.
    pub price: f64,
    /// Positive duration in minutes.
    pub duration: i64,
}

/// A service together with the employees currently assigned to it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceWithAssignments {
    pub id: i64,
    pub business_id: i64,
    pub title: String,
    pub price: f64,
    pub duration: i64,
    pub assigned_employee_ids: Vec<i64>,
}

/// One recurring weekly availability interval for an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    /// Day of week, 0 = Sunday through 6 = Saturday.
    pub day_of_week: i64,
    /// "HH:MM"
    pub start_time: String,
    /// "HH:MM"
    pub end_time: String,
    pub is_available: bool,
}

/// Client-submitted slot entry; entries missing a start or end are skipped
/// on write rather than rejecting the whole request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotEntry {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

/// One day's worth of submitted slots.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub day_of_week: i64,
    #[serde(default)]
    pub intervals: Vec<SlotEntry>,
}

/// A booked (or cancelled) client visit, joined with the display fields
/// clients render.
///
/// `status` is free text defaulting to "booked"; no transition graph is
/// enforced. No double-booking detection exists; concurrent bookings of the
/// same employee and time are not prevented. The joined fields are `None`
/// when the referenced employee or service was deleted after booking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetails {
    pub id: i64,
    pub business_id: i64,
    pub employee_id: i64,
    pub employee_name: Option<String>,
    pub service_id: i64,
    pub service_title: Option<String>,
    pub service_duration: Option<i64>,
    pub client_name: String,
    pub client_contact: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Default appointment status applied when the caller omits one.
pub const DEFAULT_APPOINTMENT_STATUS: &str = "booked";
