// ABOUTME: Service catalog route handlers with per-service assignment lists
// ABOUTME: List includes assigned employee ids; assign replaces a service's set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Service catalog routes.

use crate::auth::AuthContext;
use crate::context::ServerResources;
use crate::database::OwnedResource;
use crate::errors::AppError;
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

/// Request body for creating or updating a service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub title: String,
    pub price: f64,
    pub duration: i64,
}

/// Request body replacing the employees assigned to a service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub service_id: i64,
    #[serde(default)]
    pub employee_ids: Vec<i64>,
}

/// Service catalog routes
pub struct ServiceRoutes;

impl ServiceRoutes {
    /// Create service routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/services", get(Self::handle_list))
            .route("/services/add", post(Self::handle_add))
            .route(
                "/services/:id",
                axum::routing::put(Self::handle_update).delete(Self::handle_delete),
            )
            .route("/services/assign", post(Self::handle_assign))
            .with_state(resources)
    }

    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthContext, AppError> {
        resources.auth_manager.resolve_context(headers)
    }

    fn validate(request: &ServiceRequest) -> Result<(), AppError> {
        if request.title.trim().is_empty() {
            return Err(AppError::missing_field("title"));
        }
        if request.price <= 0.0 {
            return Err(AppError::invalid_input("price must be positive"));
        }
        if request.duration <= 0 {
            return Err(AppError::invalid_input("duration must be positive"));
        }
        Ok(())
    }

    /// Handle service listing with assigned employee ids per service
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        let services = resources
            .database
            .list_services_with_assignments(auth.business_id)
            .await?;
        Ok((StatusCode::OK, Json(services)).into_response())
    }

    /// Handle service creation
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<ServiceRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        Self::validate(&request)?;

        let id = resources
            .database
            .create_service(
                auth.business_id,
                &request.title,
                request.price,
                request.duration,
            )
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({
                "id": id,
                "businessId": auth.business_id,
                "title": request.title,
                "price": request.price,
                "duration": request.duration,
            })),
        )
            .into_response())
    }

    /// Handle full-replace service update
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(request): Json<ServiceRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        Self::validate(&request)?;

        let updated = resources
            .database
            .update_service(
                auth.business_id,
                id,
                &request.title,
                request.price,
                request.duration,
            )
            .await?;
        if !updated {
            return Err(AppError::not_found(format!("Service {id}")));
        }

        let service = resources
            .database
            .get_service(auth.business_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Service {id}")))?;

        Ok((StatusCode::OK, Json(service)).into_response())
    }

    /// Handle service deletion along with its assignment rows
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let deleted = resources.database.delete_service(auth.business_id, id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("Service {id}")));
        }

        info!("deleted service {id} for business {}", auth.business_id);
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Service deleted" })),
        )
            .into_response())
    }

    /// Handle replacement of a service's employee set. Every id must belong
    /// to the tenant or the whole request is rejected.
    async fn handle_assign(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<AssignRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        resources
            .database
            .assert_owned(OwnedResource::Service, request.service_id, auth.business_id)
            .await?;
        resources
            .database
            .assert_all_owned(
                OwnedResource::Employee,
                &request.employee_ids,
                auth.business_id,
            )
            .await?;

        resources
            .database
            .replace_employees_for_service(request.service_id, &request.employee_ids)
            .await?;

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Assignments saved" })),
        )
            .into_response())
    }
}
