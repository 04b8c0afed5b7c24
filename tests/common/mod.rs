use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as JsonValue;
use stationery_backend::{api_router, database::pool::create_pool, AppState};
use tower::ServiceExt;

/// Builds the app against the database from DATABASE_URL. Returns None (and
/// the caller skips) when no database is configured.
pub async fn setup() -> Option<(AppState, Router)> {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return None;
    }
    std::env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    std::env::set_var("JWT_SECRET", "integration_test_secret");
    let _ = stationery_backend::config::init_config();

    let pool = create_pool().await.expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let state = AppState::new(pool);
    let router = api_router(state.clone());
    Some((state, router))
}

pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

/// Registers a fresh user and returns (token, user id, email).
pub async fn register_user(router: &Router) -> (String, uuid::Uuid, String) {
    let email = format!("user_{}@example.com", uuid::Uuid::new_v4());
    let (status, body) = request(
        router,
        "POST",
        "/api/auth/register",
        None,
        Some(serde_json::json!({
            "name": "Test User",
            "email": email,
            "password": "s3cret-password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    let token = body["token"].as_str().expect("token").to_string();
    let id = body["user"]["id"].as_str().expect("user id");
    (token, id.parse().expect("uuid"), email)
}
