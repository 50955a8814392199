// ABOUTME: End-to-end test walking the full booking lifecycle through the API
// ABOUTME: Register, login, build a catalog, book, and read the dashboard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};

#[tokio::test]
async fn test_full_booking_lifecycle() {
    let (app, _resources) = common::create_test_app().await.unwrap();

    // Register, then log in again as a returning owner would
    common::register_business(&app, "owner@example.com").await;
    let (status, session) = common::send_json(
        &app,
        "POST",
        "/api/business/login",
        None,
        Some(serde_json::json!({ "email": "owner@example.com", "password": "s3cret-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = session["token"].as_str().unwrap().to_owned();

    // Build the catalog
    let employee_id = common::create_employee(&app, &token, "Ana").await;
    let service_id = common::create_service(&app, &token, "Haircut").await;

    // Assign the service and a weekly schedule
    let (status, _) = common::send_json(
        &app,
        "POST",
        &format!("/api/employees/{employee_id}/packages"),
        Some(&token),
        Some(serde_json::json!({ "serviceIds": [service_id] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = common::send_json(
        &app,
        "POST",
        &format!("/api/employees/{employee_id}/schedule"),
        Some(&token),
        Some(serde_json::json!({
            "schedule": [
                { "dayOfWeek": 1, "intervals": [{ "startTime": "09:00", "endTime": "17:00" }] },
                { "dayOfWeek": 2, "intervals": [{ "startTime": "09:00", "endTime": "17:00" }] }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Book two appointments: one today, one far in the future
    let today = Utc::now().to_rfc3339();
    let future = (Utc::now() + Duration::days(30)).to_rfc3339();
    for start in [&today, &future] {
        let (status, body) = common::send_json(
            &app,
            "POST",
            "/api/appointments/add",
            Some(&token),
            Some(serde_json::json!({
                "employeeId": employee_id,
                "serviceId": service_id,
                "clientName": "Carol",
                "appointmentDateTime": start,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    // The listing carries joined display fields
    let (status, list) =
        common::send_json(&app, "GET", "/api/appointments", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let appointments = list.as_array().unwrap();
    assert_eq!(appointments.len(), 2);
    assert_eq!(appointments[0]["employeeName"], "Ana");
    assert_eq!(appointments[0]["serviceTitle"], "Haircut");
    assert_eq!(appointments[0]["serviceDuration"].as_i64().unwrap(), 30);

    // Dashboard: only the appointment inside today's window shows up
    let (status, today_list) = common::send_json(
        &app,
        "GET",
        "/api/dashboard/appointments/today",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(today_list.as_array().unwrap().len(), 1);

    let (_, employee_count) = common::send_json(
        &app,
        "GET",
        "/api/dashboard/employees/count",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(employee_count["count"].as_i64().unwrap(), 1);

    let (_, service_count) = common::send_json(
        &app,
        "GET",
        "/api/dashboard/services/count",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(service_count["count"].as_i64().unwrap(), 1);
}
