// ABOUTME: Integration tests for request authentication behavior
// ABOUTME: Validates missing, malformed, invalid, and expired token handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::StatusCode;
use bookline::auth::AuthManager;

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _resources) = common::create_test_app().await.unwrap();

    let (status, body) = common::send_json(&app, "GET", "/api/employees", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let (app, _resources) = common::create_test_app().await.unwrap();

    let (status, body) =
        common::send_json(&app, "GET", "/api/employees", Some("not.a.jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_MALFORMED");
}

#[tokio::test]
async fn test_protected_route_with_wrong_secret() {
    let (app, _resources) = common::create_test_app().await.unwrap();
    common::register_business(&app, "shop@example.com").await;

    let other = AuthManager::new(b"some-entirely-different-secret".to_vec(), 2);
    let forged = other.generate_token(1, "shop@example.com").unwrap();

    let (status, body) =
        common::send_json(&app, "GET", "/api/employees", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_INVALID");
}

#[tokio::test]
async fn test_protected_route_with_expired_token() {
    let (app, _resources) = common::create_test_app().await.unwrap();
    let (_, business_id) = common::register_business(&app, "shop@example.com").await;

    // Same secret, negative lifetime: already expired when issued
    let expired_issuer = AuthManager::new(common::TEST_JWT_SECRET.to_vec(), -1);
    let expired = expired_issuer
        .generate_token(business_id, "shop@example.com")
        .unwrap();

    let (status, body) =
        common::send_json(&app, "GET", "/api/employees", Some(&expired), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "AUTH_EXPIRED");
}

#[tokio::test]
async fn test_valid_token_grants_access() {
    let (app, _resources) = common::create_test_app().await.unwrap();
    let (token, _) = common::register_business(&app, "shop@example.com").await;

    let (status, body) = common::send_json(&app, "GET", "/api/employees", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_health_is_unauthenticated() {
    let (app, _resources) = common::create_test_app().await.unwrap();

    let (status, body) = common::send_json(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
