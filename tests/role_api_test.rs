mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn role_delete_is_blocked_while_users_hold_it() {
    let Some((_state, router)) = common::setup().await else {
        return;
    };
    let (token, user_id, _) = common::register_user(&router).await;

    let (status, body) = common::request(
        &router,
        "POST",
        "/api/roles",
        Some(&token),
        Some(json!({ "name": format!("cashier-{}", uuid::Uuid::new_v4()) })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let role_id = body["id"].as_str().expect("id").to_string();

    let assign_uri = format!("/api/users/{}/roles/{}", user_id, role_id);
    let (status, _) = common::request(&router, "POST", &assign_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Held by a user -> 409.
    let role_uri = format!("/api/roles/{}", role_id);
    let (status, body) = common::request(&router, "DELETE", &role_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    // Unassign, then the delete goes through.
    let (status, _) = common::request(&router, "DELETE", &assign_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = common::request(&router, "DELETE", &role_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = common::request(&router, "GET", &role_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn permission_delete_is_blocked_while_roles_hold_it() {
    let Some((_state, router)) = common::setup().await else {
        return;
    };
    let (token, _, _) = common::register_user(&router).await;

    let suffix = uuid::Uuid::new_v4();
    let (status, body) = common::request(
        &router,
        "POST",
        "/api/permissions",
        Some(&token),
        Some(json!({
            "name": format!("products.read-{}", suffix),
            "resource": "products",
            "action": "read",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let permission_id = body["id"].as_str().expect("id").to_string();

    let (status, body) = common::request(
        &router,
        "POST",
        "/api/roles",
        Some(&token),
        Some(json!({ "name": format!("clerk-{}", suffix) })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let role_id = body["id"].as_str().expect("id").to_string();

    let grant_uri = format!("/api/roles/{}/permissions/{}", role_id, permission_id);
    let (status, _) = common::request(&router, "POST", &grant_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The granted permission shows up on the role detail.
    let role_uri = format!("/api/roles/{}", role_id);
    let (status, body) = common::request(&router, "GET", &role_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let granted = body["permissions"]
        .as_array()
        .expect("permissions")
        .iter()
        .any(|p| p["id"] == permission_id.as_str());
    assert!(granted);

    // Still granted to a role -> 409.
    let permission_uri = format!("/api/permissions/{}", permission_id);
    let (status, _) =
        common::request(&router, "DELETE", &permission_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Revoke, then delete succeeds.
    let (status, _) = common::request(&router, "DELETE", &grant_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) =
        common::request(&router, "DELETE", &permission_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn duplicate_role_name_conflicts() {
    let Some((_state, router)) = common::setup().await else {
        return;
    };
    let (token, _, _) = common::register_user(&router).await;

    let name = format!("manager-{}", uuid::Uuid::new_v4());
    let (status, _) = common::request(
        &router,
        "POST",
        "/api/roles",
        Some(&token),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = common::request(
        &router,
        "POST",
        "/api/roles",
        Some(&token),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
