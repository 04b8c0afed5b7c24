use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginPayload, RegisterPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "User registered, token issued"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let response = state.auth_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Authenticated, token issued"),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let response = state.auth_service.login(payload).await?;
    Ok(Json(response))
}
