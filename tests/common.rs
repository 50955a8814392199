// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, resource, and HTTP request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared test utilities for `bookline`
//!
//! Common setup functions to reduce duplication across integration tests.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bookline::{
    auth::AuthManager,
    config::{AuthConfig, DatabaseUrl, Environment, LogLevel, ServerConfig, SmtpConfig},
    context::ServerResources,
    database::Database,
    notifications::EmailNotifier,
    routes,
};
use http_body_util::BodyExt;
use std::sync::{Arc, Once};
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();

pub const TEST_JWT_SECRET: &[u8] = b"bookline-test-secret-bookline-test-secret";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard in-memory test database
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Arc::new(Database::new("sqlite::memory:").await?);
    Ok(database)
}

/// Create test authentication manager with a 2 hour expiry
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(TEST_JWT_SECRET.to_vec(), 2)
}

fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        database_url: DatabaseUrl::Memory,
        auth: AuthConfig {
            jwt_secret: String::from_utf8_lossy(TEST_JWT_SECRET).into_owned(),
            jwt_expiry_hours: 2,
        },
        smtp: SmtpConfig::default(),
        environment: Environment::Testing,
        log_level: LogLevel::Info,
    }
}

/// Full resource container backed by an in-memory database and a disabled
/// notifier
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    let auth_manager = create_test_auth_manager();
    let notifier = EmailNotifier::new(SmtpConfig::default());
    Ok(Arc::new(ServerResources::new(
        database,
        auth_manager,
        notifier,
        test_config(),
    )))
}

/// Application router over fresh test resources
pub async fn create_test_app() -> Result<(Router, Arc<ServerResources>)> {
    let resources = create_test_resources().await?;
    Ok((routes::router(resources.clone()), resources))
}

/// Send a JSON request through the router and decode the JSON response.
pub async fn send_json(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// Register a business through the API and return (token, business_id).
pub async fn register_business(app: &Router, email: &str) -> (String, i64) {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/business/register",
        None,
        Some(serde_json::json!({
            "name": "Test Salon",
            "email": email,
            "password": "s3cret-pass",
            "phone": "555-0100",
            "address": "1 Main St",
            "category": "salon",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    (
        body["token"].as_str().unwrap().to_owned(),
        body["businessId"].as_i64().unwrap(),
    )
}

/// Create an employee through the API and return its id.
pub async fn create_employee(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/employees/add",
        Some(token),
        Some(serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "employee add failed: {body}");
    body["id"].as_i64().unwrap()
}

/// Create a service through the API and return its id.
pub async fn create_service(app: &Router, token: &str, title: &str) -> i64 {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/services/add",
        Some(token),
        Some(serde_json::json!({ "title": title, "price": 25.0, "duration": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "service add failed: {body}");
    body["id"].as_i64().unwrap()
}
