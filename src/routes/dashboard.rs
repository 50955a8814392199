// ABOUTME: Dashboard route handlers for the business home screen
// ABOUTME: Today's appointments plus employee and service counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Dashboard routes.
//!
//! "Today" is the midnight-to-midnight UTC window containing the current
//! instant.

use crate::auth::AuthContext;
use crate::context::ServerResources;
use crate::errors::AppError;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Duration, Utc};
use std::sync::Arc;

/// Dashboard routes
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/dashboard/appointments/today",
                get(Self::handle_today_appointments),
            )
            .route("/dashboard/employees/count", get(Self::handle_employee_count))
            .route("/dashboard/services/count", get(Self::handle_service_count))
            .with_state(resources)
    }

    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthContext, AppError> {
        resources.auth_manager.resolve_context(headers)
    }

    /// Handle today's appointment listing
    async fn handle_today_appointments(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let start_of_day = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| AppError::internal("Failed to compute start of day"))?;
        let end_of_day = start_of_day + Duration::days(1);

        let appointments = resources
            .database
            .list_appointments_between(auth.business_id, start_of_day, end_of_day)
            .await?;

        Ok((StatusCode::OK, Json(appointments)).into_response())
    }

    /// Handle employee count
    async fn handle_employee_count(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        let count = resources.database.count_employees(auth.business_id).await?;
        Ok((StatusCode::OK, Json(serde_json::json!({ "count": count }))).into_response())
    }

    /// Handle service count
    async fn handle_service_count(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        let count = resources.database.count_services(auth.business_id).await?;
        Ok((StatusCode::OK, Json(serde_json::json!({ "count": count }))).into_response())
    }
}
