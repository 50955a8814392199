// ABOUTME: Business account route handlers for registration and sessions
// ABOUTME: Register, login, forgot-password, and reset-password endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Business account routes.
//!
//! Registration optionally seeds initial employees and services in the same
//! request. The forgot-password endpoint deliberately answers identically
//! whether or not the email exists, so it cannot be used to enumerate
//! registered accounts.

use crate::auth::{hash_password, verify_password};
use crate::context::ServerResources;
use crate::errors::AppError;
use crate::models::DaySchedule;
use crate::routes::employees::collect_slots;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Reset tokens live for one hour.
const RESET_TOKEN_EXPIRY_HOURS: i64 = 1;
const RESET_TOKEN_LEN: usize = 40;

/// Request body for business registration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub category: String,
    /// Optional initial employees created alongside the account
    #[serde(default)]
    pub employees: Vec<InitialEmployee>,
    /// Optional initial services created alongside the account
    #[serde(default)]
    pub services: Vec<InitialService>,
}

/// An initial employee supplied at registration, optionally with a weekly
/// schedule seeded in the same request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialEmployee {
    pub name: String,
    #[serde(default)]
    pub schedule: Vec<DaySchedule>,
}

/// An initial catalog service supplied at registration. Entries with an
/// empty title or non-positive price/duration are skipped, not rejected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialService {
    pub title: String,
    pub price: f64,
    pub duration: i64,
}

impl InitialService {
    fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && self.price > 0.0 && self.duration > 0
    }
}

/// Request body for login
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session response after register or login
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub business_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Business account routes
pub struct BusinessRoutes;

impl BusinessRoutes {
    /// Create registration and session routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/business/register", post(Self::handle_register))
            .route("/business/login", post(Self::handle_login))
            .route("/business/forgot-password", post(Self::handle_forgot_password))
            .route("/business/reset-password", post(Self::handle_reset_password))
            .with_state(resources)
    }

    /// Handle business registration
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        for (field, value) in [
            ("name", &request.name),
            ("email", &request.email),
            ("password", &request.password),
            ("phone", &request.phone),
            ("address", &request.address),
            ("category", &request.category),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::missing_field(field));
            }
        }

        if resources
            .database
            .get_business_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::already_exists("Email is already registered"));
        }

        let password_hash = hash_password(&request.password)?;
        let business_id = resources
            .database
            .create_business(
                &request.name,
                &request.email,
                &password_hash,
                &request.phone,
                &request.address,
                &request.category,
            )
            .await?;

        for employee in &request.employees {
            if employee.name.trim().is_empty() {
                continue;
            }
            let employee_id = resources
                .database
                .create_employee(business_id, &employee.name)
                .await?;
            let slots = collect_slots(&employee.schedule)?;
            if !slots.is_empty() {
                resources
                    .database
                    .replace_availability(employee_id, &slots)
                    .await?;
            }
        }
        for service in request.services.iter().filter(|s| s.is_valid()) {
            resources
                .database
                .create_service(business_id, &service.title, service.price, service.duration)
                .await?;
        }

        let token = resources
            .auth_manager
            .generate_token(business_id, &request.email)?;

        info!("registered business {business_id} ({})", request.email);
        Ok((
            StatusCode::CREATED,
            Json(SessionResponse { token, business_id }),
        )
            .into_response())
    }

    /// Handle login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let business = resources
            .database
            .get_business_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::invalid_input("Invalid email or password"))?;

        if !verify_password(&request.password, &business.password_hash)? {
            warn!("failed login attempt for business {}", business.id);
            return Err(AppError::invalid_input("Invalid email or password"));
        }

        let token = resources
            .auth_manager
            .generate_token(business.id, &business.email)?;

        Ok((
            StatusCode::OK,
            Json(SessionResponse {
                token,
                business_id: business.id,
            }),
        )
            .into_response())
    }

    /// Handle forgot-password: always the same response, mail only when the
    /// account exists.
    async fn handle_forgot_password(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ForgotPasswordRequest>,
    ) -> Result<Response, AppError> {
        if let Some(business) = resources
            .database
            .get_business_by_email(&request.email)
            .await?
        {
            let token: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(RESET_TOKEN_LEN)
                .map(char::from)
                .collect();
            let expiry = Utc::now() + Duration::hours(RESET_TOKEN_EXPIRY_HOURS);

            resources
                .database
                .set_reset_token(business.id, &token, expiry)
                .await?;
            resources
                .notifier
                .send_password_reset(&business.email, &token);
            info!("issued password reset token for business {}", business.id);
        }

        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "If the email exists, a reset link has been sent".to_owned(),
            }),
        )
            .into_response())
    }

    /// Handle reset-password with a previously issued token
    async fn handle_reset_password(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ResetPasswordRequest>,
    ) -> Result<Response, AppError> {
        if request.new_password.trim().is_empty() {
            return Err(AppError::missing_field("newPassword"));
        }

        let business_id = resources
            .database
            .get_business_by_reset_token(&request.token)
            .await?
            .ok_or_else(|| AppError::invalid_input("Invalid or expired reset token"))?;

        let password_hash = hash_password(&request.new_password)?;
        resources
            .database
            .reset_password(business_id, &password_hash)
            .await?;

        info!("password reset completed for business {business_id}");
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "Password has been reset".to_owned(),
            }),
        )
            .into_response())
    }
}
