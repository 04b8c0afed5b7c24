use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::user_dto::{
        ChangePasswordPayload, UpdateUserPayload, UserResponse, UserWithRolesResponse,
    },
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.user_service.find_all().await?;
    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.find_by_id(id).await?;
    let roles = state.user_service.roles_of(id).await?;
    Ok(Json(UserWithRolesResponse {
        user: user.into(),
        roles,
    }))
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.update(id, payload).await?;
    Ok(Json(UserResponse::from(user)))
}

#[axum::debug_handler]
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state.user_service.change_password(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn lock_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.lock(id).await?;
    Ok(Json(UserResponse::from(user)))
}

#[axum::debug_handler]
pub async fn unlock_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.unlock(id).await?;
    Ok(Json(UserResponse::from(user)))
}

#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.user_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn assign_role(
    State(state): State<AppState>,
    Path((user_id, role_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    state.user_service.assign_role(user_id, role_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn remove_role(
    State(state): State<AppState>,
    Path((user_id, role_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    state.user_service.remove_role(user_id, role_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
