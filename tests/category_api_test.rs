mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn category_crud_round_trip() {
    let Some((_state, router)) = common::setup().await else {
        return;
    };
    let (token, _, _) = common::register_user(&router).await;

    let name = format!("Notebooks {}", uuid::Uuid::new_v4());
    let (status, body) = common::request(
        &router,
        "POST",
        "/api/categories",
        Some(&token),
        Some(json!({ "name": name, "description": "Spiral and hardcover" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().expect("id").to_string();

    // Read back.
    let uri = format!("/api/categories/{}", id);
    let (status, body) = common::request(&router, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], name.as_str());

    // Update the name, read again.
    let renamed = format!("{} (renamed)", name);
    let (status, body) = common::request(
        &router,
        "PATCH",
        &uri,
        Some(&token),
        Some(json!({ "name": renamed })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], renamed.as_str());

    let (status, body) = common::request(&router, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], renamed.as_str());

    // Delete, then reads return 404.
    let (status, _) = common::request(&router, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = common::request(&router, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn duplicate_category_name_conflicts() {
    let Some((_state, router)) = common::setup().await else {
        return;
    };
    let (token, _, _) = common::register_user(&router).await;

    let name = format!("Pens {}", uuid::Uuid::new_v4());
    let (status, _) = common::request(
        &router,
        "POST",
        "/api/categories",
        Some(&token),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = common::request(
        &router,
        "POST",
        "/api/categories",
        Some(&token),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn bulk_delete_is_all_or_nothing() {
    let Some((_state, router)) = common::setup().await else {
        return;
    };
    let (token, _, _) = common::register_user(&router).await;

    let mut ids = Vec::new();
    for i in 0..2 {
        let (status, body) = common::request(
            &router,
            "POST",
            "/api/categories",
            Some(&token),
            Some(json!({ "name": format!("Bulk {} {}", i, uuid::Uuid::new_v4()) })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["id"].as_str().expect("id").to_string());
    }

    // One unknown id fails the whole batch.
    let mut with_missing = ids.clone();
    with_missing.push(uuid::Uuid::new_v4().to_string());
    let (status, _) = common::request(
        &router,
        "POST",
        "/api/categories/delete-many",
        Some(&token),
        Some(json!({ "ids": with_missing })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Nothing was deleted.
    for id in &ids {
        let uri = format!("/api/categories/{}", id);
        let (status, _) = common::request(&router, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    // The clean batch succeeds.
    let (status, _) = common::request(
        &router,
        "POST",
        "/api/categories/delete-many",
        Some(&token),
        Some(json!({ "ids": ids.clone() })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    for id in &ids {
        let uri = format!("/api/categories/{}", id);
        let (status, _) = common::request(&router, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn bulk_delete_tolerates_repeated_ids() {
    let Some((_state, router)) = common::setup().await else {
        return;
    };
    let (token, _, _) = common::register_user(&router).await;

    let mut ids = Vec::new();
    for i in 0..2 {
        let (status, body) = common::request(
            &router,
            "POST",
            "/api/categories",
            Some(&token),
            Some(json!({ "name": format!("Repeat {} {}", i, uuid::Uuid::new_v4()) })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["id"].as_str().expect("id").to_string());
    }

    // The same id listed twice still counts as one existing category.
    let batch = vec![ids[0].clone(), ids[0].clone(), ids[1].clone()];
    let (status, _) = common::request(
        &router,
        "POST",
        "/api/categories/delete-many",
        Some(&token),
        Some(json!({ "ids": batch })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    for id in &ids {
        let uri = format!("/api/categories/{}", id);
        let (status, _) = common::request(&router, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn validation_errors_carry_field_messages() {
    let Some((_state, router)) = common::setup().await else {
        return;
    };
    let (token, _, _) = common::register_user(&router).await;

    let (status, body) = common::request(
        &router,
        "POST",
        "/api/categories",
        Some(&token),
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["name"].is_array());
}
