mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn clock_in_derives_status_and_rejects_second_entry() {
    let Some((_state, router)) = common::setup().await else {
        return;
    };
    let (token, user_id, _) = common::register_user(&router).await;

    // Within the 15-minute grace window -> PRESENT.
    let (status, body) = common::request(
        &router,
        "POST",
        "/api/attendance/clock-in",
        Some(&token),
        Some(json!({ "user_id": user_id, "timestamp": "2025-06-02T09:05:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "clock-in failed: {}", body);
    assert_eq!(body["status"], "PRESENT");

    // Same user, same calendar day -> 409.
    let (status, _) = common::request(
        &router,
        "POST",
        "/api/attendance/clock-in",
        Some(&token),
        Some(json!({ "user_id": user_id, "timestamp": "2025-06-02T10:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Past the threshold on another day -> LATE.
    let (status, body) = common::request(
        &router,
        "POST",
        "/api/attendance/clock-in",
        Some(&token),
        Some(json!({ "user_id": user_id, "timestamp": "2025-06-03T09:30:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "LATE");
}

#[tokio::test]
async fn clock_out_computes_hours_and_statuses() {
    let Some((_state, router)) = common::setup().await else {
        return;
    };
    let (token, user_id, _) = common::register_user(&router).await;

    // Full PRESENT day.
    let (_, body) = common::request(
        &router,
        "POST",
        "/api/attendance/clock-in",
        Some(&token),
        Some(json!({ "user_id": user_id, "timestamp": "2025-06-02T09:00:00Z" })),
    )
    .await;
    let id = body["id"].as_str().expect("id").to_string();

    let uri = format!("/api/attendance/{}/clock-out", id);
    let (status, body) = common::request(
        &router,
        "POST",
        &uri,
        Some(&token),
        Some(json!({ "timestamp": "2025-06-02T17:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PRESENT");
    assert!((body["total_hours"].as_f64().unwrap() - 8.0).abs() < 1e-9);

    // Second clock-out on the same record -> 409.
    let (status, _) = common::request(
        &router,
        "POST",
        &uri,
        Some(&token),
        Some(json!({ "timestamp": "2025-06-02T18:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Leaving more than the threshold before the end -> EARLY_DEPARTURE.
    let (_, body) = common::request(
        &router,
        "POST",
        "/api/attendance/clock-in",
        Some(&token),
        Some(json!({ "user_id": user_id, "timestamp": "2025-06-03T09:00:00Z" })),
    )
    .await;
    let id = body["id"].as_str().expect("id").to_string();
    let uri = format!("/api/attendance/{}/clock-out", id);
    let (status, body) = common::request(
        &router,
        "POST",
        &uri,
        Some(&token),
        Some(json!({ "timestamp": "2025-06-03T15:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "EARLY_DEPARTURE");

    // A LATE morning is not downgraded by an early afternoon.
    let (_, body) = common::request(
        &router,
        "POST",
        "/api/attendance/clock-in",
        Some(&token),
        Some(json!({ "user_id": user_id, "timestamp": "2025-06-04T10:00:00Z" })),
    )
    .await;
    assert_eq!(body["status"], "LATE");
    let id = body["id"].as_str().expect("id").to_string();
    let uri = format!("/api/attendance/{}/clock-out", id);
    let (status, body) = common::request(
        &router,
        "POST",
        &uri,
        Some(&token),
        Some(json!({ "timestamp": "2025-06-04T14:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "LATE");
}

#[tokio::test]
async fn attendance_reads_filter_by_user_and_range() {
    let Some((_state, router)) = common::setup().await else {
        return;
    };
    let (token, user_id, _) = common::register_user(&router).await;

    for day in ["2025-07-01", "2025-07-02", "2025-07-03"] {
        let (status, _) = common::request(
            &router,
            "POST",
            "/api/attendance/clock-in",
            Some(&token),
            Some(json!({ "user_id": user_id, "timestamp": format!("{}T09:00:00Z", day) })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let uri = format!("/api/attendance?user_id={}", user_id);
    let (status, body) = common::request(&router, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let uri = format!(
        "/api/attendance?user_id={}&from=2025-07-02&to=2025-07-03",
        user_id
    );
    let (status, body) = common::request(&router, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let uri = format!("/api/attendance?user_id={}&status=PRESENT", user_id);
    let (status, body) = common::request(&router, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}
