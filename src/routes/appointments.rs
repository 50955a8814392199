// ABOUTME: Appointment route handlers for the scheduling ledger
// ABOUTME: List/create/update/delete plus tenant-scoped bulk purge of old entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Appointment routes.
//!
//! Create and update guard both foreign ids against the tenant before any
//! write, so an appointment can never reference another tenant's employee or
//! service. Timestamps are RFC 3339 and parsed centrally.

use crate::auth::AuthContext;
use crate::context::ServerResources;
use crate::database::OwnedResource;
use crate::errors::AppError;
use crate::models::DEFAULT_APPOINTMENT_STATUS;
use crate::utils::{parse_datetime, parse_optional_datetime};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Request body for creating or updating an appointment
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub employee_id: i64,
    pub service_id: i64,
    pub client_name: String,
    pub client_contact: Option<String>,
    /// RFC 3339
    pub appointment_date_time: String,
    /// RFC 3339, optional
    pub end_date_time: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Request body for the bulk purge of past appointments
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOldRequest {
    /// RFC 3339 cutoff; appointments strictly before it are removed
    pub before: String,
}

/// Appointment routes
pub struct AppointmentRoutes;

impl AppointmentRoutes {
    /// Create appointment routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/appointments", get(Self::handle_list))
            .route("/appointments/add", post(Self::handle_add))
            .route(
                "/appointments/:id",
                axum::routing::put(Self::handle_update).delete(Self::handle_delete),
            )
            .route("/appointments/deleteOld", post(Self::handle_delete_old))
            .with_state(resources)
    }

    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthContext, AppError> {
        resources.auth_manager.resolve_context(headers)
    }

    /// Validate the request body and guard both foreign ids.
    async fn validate(
        resources: &Arc<ServerResources>,
        business_id: i64,
        request: &AppointmentRequest,
    ) -> Result<(), AppError> {
        if request.client_name.trim().is_empty() {
            return Err(AppError::missing_field("clientName"));
        }
        resources
            .database
            .assert_owned(OwnedResource::Employee, request.employee_id, business_id)
            .await?;
        resources
            .database
            .assert_owned(OwnedResource::Service, request.service_id, business_id)
            .await?;
        Ok(())
    }

    /// Handle appointment listing with joined display fields, soonest first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        let appointments = resources.database.list_appointments(auth.business_id).await?;
        Ok((StatusCode::OK, Json(appointments)).into_response())
    }

    /// Handle appointment creation
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<AppointmentRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        Self::validate(&resources, auth.business_id, &request).await?;

        let start_at = parse_datetime("appointmentDateTime", &request.appointment_date_time)?;
        let end_at = parse_optional_datetime("endDateTime", request.end_date_time.as_deref())?;
        let status = request
            .status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_APPOINTMENT_STATUS);

        let id = resources
            .database
            .create_appointment(
                auth.business_id,
                request.employee_id,
                request.service_id,
                &request.client_name,
                request.client_contact.as_deref(),
                start_at,
                end_at,
                status,
                request.notes.as_deref(),
            )
            .await?;

        let created = resources
            .database
            .get_appointment(auth.business_id, id)
            .await?
            .ok_or_else(|| AppError::internal("Appointment vanished after insert"))?;

        resources.notifier.send_appointment_created(
            &auth.email,
            &request.client_name,
            &start_at.to_rfc3339(),
        );

        info!("created appointment {id} for business {}", auth.business_id);
        Ok((StatusCode::CREATED, Json(created)).into_response())
    }

    /// Handle full-replace appointment update
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(request): Json<AppointmentRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        resources
            .database
            .assert_owned(OwnedResource::Appointment, id, auth.business_id)
            .await?;
        Self::validate(&resources, auth.business_id, &request).await?;

        let start_at = parse_datetime("appointmentDateTime", &request.appointment_date_time)?;
        let end_at = parse_optional_datetime("endDateTime", request.end_date_time.as_deref())?;
        let status = request
            .status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_APPOINTMENT_STATUS);

        let updated = resources
            .database
            .update_appointment(
                auth.business_id,
                id,
                request.employee_id,
                request.service_id,
                &request.client_name,
                request.client_contact.as_deref(),
                start_at,
                end_at,
                status,
                request.notes.as_deref(),
            )
            .await?;
        if !updated {
            return Err(AppError::not_found(format!("Appointment {id}")));
        }

        let appointment = resources
            .database
            .get_appointment(auth.business_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Appointment {id}")))?;

        Ok((StatusCode::OK, Json(appointment)).into_response())
    }

    /// Handle appointment deletion
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let deleted = resources
            .database
            .delete_appointment(auth.business_id, id)
            .await?;
        if !deleted {
            return Err(AppError::not_found(format!("Appointment {id}")));
        }

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Appointment deleted" })),
        )
            .into_response())
    }

    /// Handle tenant-scoped purge of appointments starting before a cutoff
    async fn handle_delete_old(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<DeleteOldRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        let cutoff = parse_datetime("before", &request.before)?;

        let deleted = resources
            .database
            .delete_appointments_before(auth.business_id, cutoff)
            .await?;

        info!(
            "purged {deleted} appointments before {cutoff} for business {}",
            auth.business_id
        );
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "deletedCount": deleted })),
        )
            .into_response())
    }
}
