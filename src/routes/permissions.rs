use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::permission_dto::{CreatePermissionPayload, UpdatePermissionPayload},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_permissions(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let permissions = state.permission_service.find_all().await?;
    Ok(Json(permissions))
}

#[axum::debug_handler]
pub async fn get_permission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let permission = state.permission_service.find_by_id(id).await?;
    Ok(Json(permission))
}

#[axum::debug_handler]
pub async fn create_permission(
    State(state): State<AppState>,
    Json(payload): Json<CreatePermissionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let permission = state.permission_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(permission)))
}

#[axum::debug_handler]
pub async fn update_permission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePermissionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let permission = state.permission_service.update(id, payload).await?;
    Ok(Json(permission))
}

#[axum::debug_handler]
pub async fn delete_permission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.permission_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
