// ABOUTME: Authenticated account route handlers for the business profile
// ABOUTME: Profile read/update with email-uniqueness check, full account deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Account routes.
//!
//! Changing the password requires the current password; changing the email
//! requires it to be unused by any other tenant. Account deletion removes
//! everything the business owns in one transaction.

use crate::auth::{hash_password, verify_password, AuthContext};
use crate::context::ServerResources;
use crate::errors::AppError;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Request body for profile updates
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub category: String,
    /// Required when `new_password` is set
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Account management routes
pub struct AccountRoutes;

impl AccountRoutes {
    /// Create account routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/account/profile",
                get(Self::handle_get_profile).put(Self::handle_update_profile),
            )
            .route("/account/delete", delete(Self::handle_delete_account))
            .with_state(resources)
    }

    /// Extract and authenticate the tenant from the authorization header
    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthContext, AppError> {
        resources.auth_manager.resolve_context(headers)
    }

    /// Handle profile fetch
    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let business = resources
            .database
            .get_business(auth.business_id)
            .await?
            .ok_or_else(|| AppError::not_found("Business"))?;

        Ok((StatusCode::OK, Json(business)).into_response())
    }

    /// Handle profile update
    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<UpdateProfileRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        for (field, value) in [("name", &request.name), ("email", &request.email)] {
            if value.trim().is_empty() {
                return Err(AppError::missing_field(field));
            }
        }

        let business = resources
            .database
            .get_business(auth.business_id)
            .await?
            .ok_or_else(|| AppError::not_found("Business"))?;

        if request.email != business.email
            && resources
                .database
                .email_taken_by_other(&request.email, auth.business_id)
                .await?
        {
            return Err(AppError::already_exists("Email is already registered"));
        }

        let new_hash = match &request.new_password {
            Some(new_password) if !new_password.trim().is_empty() => {
                let current = request
                    .current_password
                    .as_deref()
                    .ok_or_else(|| AppError::missing_field("currentPassword"))?;
                if !verify_password(current, &business.password_hash)? {
                    return Err(AppError::invalid_input("Current password is incorrect"));
                }
                Some(hash_password(new_password)?)
            }
            _ => None,
        };

        resources
            .database
            .update_business_profile(
                auth.business_id,
                &request.name,
                &request.email,
                &request.phone,
                &request.address,
                &request.category,
                new_hash.as_deref(),
            )
            .await?;

        let updated = resources
            .database
            .get_business(auth.business_id)
            .await?
            .ok_or_else(|| AppError::not_found("Business"))?;

        Ok((StatusCode::OK, Json(updated)).into_response())
    }

    /// Handle full account deletion
    async fn handle_delete_account(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let deleted = resources
            .database
            .delete_business_cascade(auth.business_id)
            .await?;
        if !deleted {
            return Err(AppError::not_found("Business"));
        }

        info!("deleted business account {}", auth.business_id);
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Account deleted" })),
        )
            .into_response())
    }
}
