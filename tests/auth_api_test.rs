mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_login_and_token_flow() {
    let Some((_state, router)) = common::setup().await else {
        return;
    };

    let email = format!("auth_{}@example.com", uuid::Uuid::new_v4());
    let payload = json!({
        "name": "Auth Tester",
        "email": email,
        "password": "s3cret-password",
    });

    let (status, body) =
        common::request(&router, "POST", "/api/auth/register", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let token = body["token"].as_str().expect("token");
    assert_eq!(token.split('.').count(), 3);
    assert_eq!(body["user"]["email"], email.as_str());
    // Password material never leaves the service.
    assert!(body["user"].get("password_hash").is_none());

    // Token subject decodes back to the registered email.
    let claims = stationery_backend::utils::token::decode_token("integration_test_secret", token)
        .expect("claims");
    assert_eq!(claims.sub, email);

    // Same email again -> 409.
    let (status, body) =
        common::request(&router, "POST", "/api/auth/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    // Correct credentials -> fresh token.
    let (status, body) = common::request(
        &router,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "s3cret-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());

    // Wrong password -> 401.
    let (status, _) = common::request(
        &router,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Unknown email -> 401.
    let (status, _) = common::request(
        &router,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "whatever1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_enforce_authentication() {
    let Some((_state, router)) = common::setup().await else {
        return;
    };

    // No Authorization header passes the decode step but is rejected by the
    // guard.
    let (status, body) = common::request(&router, "GET", "/api/categories", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication required");

    // Expired tokens short-circuit with the distinguishing code.
    let (_, _, email) = common::register_user(&router).await;
    let expired =
        stationery_backend::utils::token::issue("integration_test_secret", &email, -1)
            .expect("expired token");
    let (status, body) =
        common::request(&router, "GET", "/api/categories", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "TOKEN_EXPIRED");

    // Garbage tokens are a plain 401.
    let (status, body) =
        common::request(&router, "GET", "/api/categories", Some("not.a.token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("code").is_none());

    // A valid token gets through.
    let (token, _, _) = common::register_user(&router).await;
    let (status, _) =
        common::request(&router, "GET", "/api/categories", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}
