// ABOUTME: Employee route handlers for catalog CRUD, schedules, and packages
// ABOUTME: Every foreign employee id is ownership-checked before any write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Employee routes.
//!
//! The schedule endpoints replace an employee's full weekly availability;
//! the packages endpoints replace the set of services an employee performs.
//! Both are wholesale replace, not patch.

use crate::auth::AuthContext;
use crate::context::ServerResources;
use crate::database::OwnedResource;
use crate::errors::AppError;
use crate::models::{AvailabilitySlot, DaySchedule};
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

/// Request body for creating or renaming an employee
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub name: String,
}

/// Request body replacing an employee's service set
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagesRequest {
    #[serde(default)]
    pub service_ids: Vec<i64>,
}

/// Request body replacing an employee's weekly schedule
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(default)]
    pub schedule: Vec<DaySchedule>,
}

/// Flatten submitted day schedules into storable slots.
///
/// Entries missing a start or end time are skipped rather than rejecting the
/// whole request; an out-of-range day rejects it.
pub(crate) fn collect_slots(schedule: &[DaySchedule]) -> Result<Vec<AvailabilitySlot>, AppError> {
    let mut slots = Vec::new();
    for day in schedule {
        if !(0..=6).contains(&day.day_of_week) {
            return Err(AppError::invalid_input(format!(
                "dayOfWeek must be 0-6, got {}",
                day.day_of_week
            )));
        }
        for entry in &day.intervals {
            let (Some(start), Some(end)) = (&entry.start_time, &entry.end_time) else {
                continue;
            };
            slots.push(AvailabilitySlot {
                day_of_week: day.day_of_week,
                start_time: start.clone(),
                end_time: end.clone(),
                is_available: entry.is_available.unwrap_or(true),
            });
        }
    }
    Ok(slots)
}

/// Employee management routes
pub struct EmployeeRoutes;

impl EmployeeRoutes {
    /// Create employee routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/employees", get(Self::handle_list))
            .route("/employees/add", post(Self::handle_add))
            .route(
                "/employees/:id",
                axum::routing::put(Self::handle_update).delete(Self::handle_delete),
            )
            .route(
                "/employees/:id/schedule",
                get(Self::handle_get_schedule).post(Self::handle_set_schedule),
            )
            .route(
                "/employees/:id/packages",
                get(Self::handle_get_packages).post(Self::handle_set_packages),
            )
            .with_state(resources)
    }

    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthContext, AppError> {
        resources.auth_manager.resolve_context(headers)
    }

    /// Handle employee listing
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        let employees = resources.database.list_employees(auth.business_id).await?;
        Ok((StatusCode::OK, Json(employees)).into_response())
    }

    /// Handle employee creation
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<EmployeeRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        if request.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let id = resources
            .database
            .create_employee(auth.business_id, &request.name)
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({
                "id": id,
                "businessId": auth.business_id,
                "name": request.name,
            })),
        )
            .into_response())
    }

    /// Handle employee rename
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(request): Json<EmployeeRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        if request.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let updated = resources
            .database
            .update_employee(auth.business_id, id, &request.name)
            .await?;
        if !updated {
            return Err(AppError::not_found(format!("Employee {id}")));
        }

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "id": id,
                "businessId": auth.business_id,
                "name": request.name,
            })),
        )
            .into_response())
    }

    /// Handle employee deletion along with its slots and assignments
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let deleted = resources
            .database
            .delete_employee(auth.business_id, id)
            .await?;
        if !deleted {
            return Err(AppError::not_found(format!("Employee {id}")));
        }

        info!("deleted employee {id} for business {}", auth.business_id);
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Employee deleted" })),
        )
            .into_response())
    }

    /// Handle schedule fetch, grouped by day of week
    async fn handle_get_schedule(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        resources
            .database
            .assert_owned(OwnedResource::Employee, id, auth.business_id)
            .await?;

        let schedule = resources.database.get_availability(id).await?;
        Ok((StatusCode::OK, Json(schedule)).into_response())
    }

    /// Handle schedule replacement. Entries missing a start or end time are
    /// skipped; the rest replace the prior set wholesale.
    async fn handle_set_schedule(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(request): Json<ScheduleRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        resources
            .database
            .assert_owned(OwnedResource::Employee, id, auth.business_id)
            .await?;

        let slots = collect_slots(&request.schedule)?;
        resources.database.replace_availability(id, &slots).await?;

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Schedule saved" })),
        )
            .into_response())
    }

    /// Handle fetch of the employee's assigned service ids
    async fn handle_get_packages(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        resources
            .database
            .assert_owned(OwnedResource::Employee, id, auth.business_id)
            .await?;

        let service_ids = resources.database.list_services_for_employee(id).await?;
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "serviceIds": service_ids })),
        )
            .into_response())
    }

    /// Handle replacement of the employee's service set. Every id must belong
    /// to the tenant or the whole request is rejected.
    async fn handle_set_packages(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(request): Json<PackagesRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        resources
            .database
            .assert_owned(OwnedResource::Employee, id, auth.business_id)
            .await?;
        resources
            .database
            .assert_all_owned(OwnedResource::Service, &request.service_ids, auth.business_id)
            .await?;

        resources
            .database
            .replace_services_for_employee(id, &request.service_ids)
            .await?;

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Packages saved" })),
        )
            .into_response())
    }
}
