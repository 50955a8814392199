// ABOUTME: Integration tests for the appointment scheduling ledger
// ABOUTME: Validates field mirroring, tenant scoping, purge cutoff, joins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::StatusCode;
use axum::Router;

async fn setup_booking(app: &Router, email: &str) -> (String, i64, i64) {
    let (token, _) = common::register_business(app, email).await;
    let employee_id = common::create_employee(app, &token, "Ana").await;
    let service_id = common::create_service(app, &token, "Cut").await;
    (token, employee_id, service_id)
}

async fn book(
    app: &Router,
    token: &str,
    employee_id: i64,
    service_id: i64,
    start: &str,
) -> serde_json::Value {
    let (status, body) = common::send_json(
        app,
        "POST",
        "/api/appointments/add",
        Some(token),
        Some(serde_json::json!({
            "employeeId": employee_id,
            "serviceId": service_id,
            "clientName": "Carol",
            "clientContact": "555-0199",
            "appointmentDateTime": start,
            "notes": "first visit",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "booking failed: {body}");
    body
}

#[tokio::test]
async fn test_create_mirrors_fields_and_stores_tenant() {
    let (app, _resources) = common::create_test_app().await.unwrap();
    let (token, employee_id, service_id) = setup_booking(&app, "shop@example.com").await;

    let created = book(&app, &token, employee_id, service_id, "2025-09-01T10:00:00Z").await;

    assert_eq!(created["clientName"], "Carol");
    assert_eq!(created["clientContact"], "555-0199");
    assert_eq!(created["notes"], "first visit");
    assert_eq!(created["employeeId"].as_i64().unwrap(), employee_id);
    assert_eq!(created["serviceId"].as_i64().unwrap(), service_id);
    assert_eq!(created["status"], "booked");
    assert!(created["businessId"].as_i64().unwrap() > 0);
    // Joined display fields come back on create
    assert_eq!(created["employeeName"], "Ana");
    assert_eq!(created["serviceTitle"], "Cut");
}

#[tokio::test]
async fn test_list_is_sorted_by_start_ascending() {
    let (app, _resources) = common::create_test_app().await.unwrap();
    let (token, employee_id, service_id) = setup_booking(&app, "shop@example.com").await;

    book(&app, &token, employee_id, service_id, "2025-09-03T10:00:00Z").await;
    book(&app, &token, employee_id, service_id, "2025-09-01T10:00:00Z").await;
    book(&app, &token, employee_id, service_id, "2025-09-02T10:00:00Z").await;

    let (_, list) = common::send_json(&app, "GET", "/api/appointments", Some(&token), None).await;
    let starts: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["startAt"].as_str().unwrap())
        .collect();
    assert_eq!(starts.len(), 3);
    assert!(starts[0] < starts[1] && starts[1] < starts[2]);
}

#[tokio::test]
async fn test_unparseable_datetime_is_rejected() {
    let (app, _resources) = common::create_test_app().await.unwrap();
    let (token, employee_id, service_id) = setup_booking(&app, "shop@example.com").await;

    let (status, body) = common::send_json(
        &app,
        "POST",
        "/api/appointments/add",
        Some(&token),
        Some(serde_json::json!({
            "employeeId": employee_id,
            "serviceId": service_id,
            "clientName": "Carol",
            "appointmentDateTime": "next tuesday",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn test_update_is_full_replace() {
    let (app, _resources) = common::create_test_app().await.unwrap();
    let (token, employee_id, service_id) = setup_booking(&app, "shop@example.com").await;

    let created = book(&app, &token, employee_id, service_id, "2025-09-01T10:00:00Z").await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = common::send_json(
        &app,
        "PUT",
        &format!("/api/appointments/{id}"),
        Some(&token),
        Some(serde_json::json!({
            "employeeId": employee_id,
            "serviceId": service_id,
            "clientName": "Caroline",
            "appointmentDateTime": "2025-09-01T11:00:00Z",
            "status": "confirmed",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["clientName"], "Caroline");
    assert_eq!(updated["status"], "confirmed");
    // Omitted optional fields are cleared, not preserved
    assert!(updated["notes"].is_null());
    assert!(updated["clientContact"].is_null());
}

#[tokio::test]
async fn test_cross_tenant_update_and_delete_are_not_found() {
    let (app, _resources) = common::create_test_app().await.unwrap();
    let (token_a, employee_a, service_a) = setup_booking(&app, "a@example.com").await;
    let (token_b, ..) = setup_booking(&app, "b@example.com").await;

    let created = book(&app, &token_a, employee_a, service_a, "2025-09-01T10:00:00Z").await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = common::send_json(
        &app,
        "PUT",
        &format!("/api/appointments/{id}"),
        Some(&token_b),
        Some(serde_json::json!({
            "employeeId": employee_a,
            "serviceId": service_a,
            "clientName": "Mallory",
            "appointmentDateTime": "2025-09-01T10:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::send_json(
        &app,
        "DELETE",
        &format!("/api/appointments/{id}"),
        Some(&token_b),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The row is unchanged for its real owner
    let (_, list) = common::send_json(&app, "GET", "/api/appointments", Some(&token_a), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["clientName"], "Carol");
}

#[tokio::test]
async fn test_delete_old_respects_cutoff_and_tenant() {
    let (app, _resources) = common::create_test_app().await.unwrap();
    let (token_a, employee_a, service_a) = setup_booking(&app, "a@example.com").await;
    let (token_b, employee_b, service_b) = setup_booking(&app, "b@example.com").await;

    book(&app, &token_a, employee_a, service_a, "2025-01-01T10:00:00Z").await;
    book(&app, &token_a, employee_a, service_a, "2025-02-01T10:00:00Z").await;
    // Exactly at the cutoff: kept (strictly before)
    book(&app, &token_a, employee_a, service_a, "2025-06-01T00:00:00Z").await;
    book(&app, &token_a, employee_a, service_a, "2025-12-01T10:00:00Z").await;
    book(&app, &token_b, employee_b, service_b, "2025-01-15T10:00:00Z").await;

    let (status, body) = common::send_json(
        &app,
        "POST",
        "/api/appointments/deleteOld",
        Some(&token_a),
        Some(serde_json::json!({ "before": "2025-06-01T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"].as_u64().unwrap(), 2);

    let (_, list_a) =
        common::send_json(&app, "GET", "/api/appointments", Some(&token_a), None).await;
    assert_eq!(list_a.as_array().unwrap().len(), 2);

    // The other tenant's past appointment is untouched
    let (_, list_b) =
        common::send_json(&app, "GET", "/api/appointments", Some(&token_b), None).await;
    assert_eq!(list_b.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleted_employee_leaves_null_display_fields() {
    let (app, _resources) = common::create_test_app().await.unwrap();
    let (token, employee_id, service_id) = setup_booking(&app, "shop@example.com").await;

    book(&app, &token, employee_id, service_id, "2025-09-01T10:00:00Z").await;

    common::send_json(
        &app,
        "DELETE",
        &format!("/api/employees/{employee_id}"),
        Some(&token),
        None,
    )
    .await;

    let (_, list) = common::send_json(&app, "GET", "/api/appointments", Some(&token), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert!(list[0]["employeeName"].is_null());
    assert_eq!(list[0]["employeeId"].as_i64().unwrap(), employee_id);
}
