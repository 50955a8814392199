// ABOUTME: Integration tests for the tenant ownership guard
// ABOUTME: Validates foreign and nonexistent ids are rejected identically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::StatusCode;
use bookline::database::OwnedResource;
use bookline::errors::ErrorCode;

#[tokio::test]
async fn test_owned_id_passes() {
    let database = common::create_test_database().await.unwrap();
    let business_id = database
        .create_business("A", "a@x.com", "hash", "", "", "")
        .await
        .unwrap();
    let employee_id = database.create_employee(business_id, "Ana").await.unwrap();

    database
        .assert_owned(OwnedResource::Employee, employee_id, business_id)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_foreign_and_missing_ids_are_indistinguishable() {
    let database = common::create_test_database().await.unwrap();
    let tenant_a = database
        .create_business("A", "a@x.com", "hash", "", "", "")
        .await
        .unwrap();
    let tenant_b = database
        .create_business("B", "b@x.com", "hash", "", "", "")
        .await
        .unwrap();
    let employee_of_b = database.create_employee(tenant_b, "Ben").await.unwrap();

    let foreign = database
        .assert_owned(OwnedResource::Employee, employee_of_b, tenant_a)
        .await
        .unwrap_err();
    let missing = database
        .assert_owned(OwnedResource::Employee, 9999, tenant_a)
        .await
        .unwrap_err();

    assert_eq!(foreign.code, ErrorCode::ResourceNotFound);
    assert_eq!(missing.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_set_guard_rejects_whole_batch_on_one_failure() {
    let database = common::create_test_database().await.unwrap();
    let business_id = database
        .create_business("A", "a@x.com", "hash", "", "", "")
        .await
        .unwrap();
    let owned = database
        .create_service(business_id, "Cut", 20.0, 30)
        .await
        .unwrap();

    let err = database
        .assert_all_owned(OwnedResource::Service, &[owned, 404_404], business_id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_appointment_create_rejects_foreign_employee() {
    let (app, _resources) = common::create_test_app().await.unwrap();
    let (token_a, _) = common::register_business(&app, "a@example.com").await;
    let (token_b, _) = common::register_business(&app, "b@example.com").await;

    let employee_of_b = common::create_employee(&app, &token_b, "Ben").await;
    let service_of_a = common::create_service(&app, &token_a, "Cut").await;

    let (status, body) = common::send_json(
        &app,
        "POST",
        "/api/appointments/add",
        Some(&token_a),
        Some(serde_json::json!({
            "employeeId": employee_of_b,
            "serviceId": service_of_a,
            "clientName": "Carol",
            "appointmentDateTime": "2025-09-01T10:00:00Z",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");

    // Nothing was written
    let (status, list) =
        common::send_json(&app, "GET", "/api/appointments", Some(&token_a), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_assignment_rejects_foreign_service() {
    let (app, _resources) = common::create_test_app().await.unwrap();
    let (token_a, _) = common::register_business(&app, "a@example.com").await;
    let (token_b, _) = common::register_business(&app, "b@example.com").await;

    let employee_of_a = common::create_employee(&app, &token_a, "Ana").await;
    let service_of_a = common::create_service(&app, &token_a, "Cut").await;
    let service_of_b = common::create_service(&app, &token_b, "Shave").await;

    let (status, _) = common::send_json(
        &app,
        "POST",
        &format!("/api/employees/{employee_of_a}/packages"),
        Some(&token_a),
        Some(serde_json::json!({ "serviceIds": [service_of_a, service_of_b] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The batch was rejected before any write
    let (_, body) = common::send_json(
        &app,
        "GET",
        &format!("/api/employees/{employee_of_a}/packages"),
        Some(&token_a),
        None,
    )
    .await;
    assert!(body["serviceIds"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cross_tenant_schedule_access_is_not_found() {
    let (app, _resources) = common::create_test_app().await.unwrap();
    let (token_a, _) = common::register_business(&app, "a@example.com").await;
    let (token_b, _) = common::register_business(&app, "b@example.com").await;

    let employee_of_b = common::create_employee(&app, &token_b, "Ben").await;

    let (status, _) = common::send_json(
        &app,
        "GET",
        &format!("/api/employees/{employee_of_b}/schedule"),
        Some(&token_a),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
