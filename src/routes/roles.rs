use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::role_dto::{CreateRolePayload, UpdateRolePayload},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_roles(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let roles = state.role_service.find_all().await?;
    Ok(Json(roles))
}

#[axum::debug_handler]
pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let role = state.role_service.get_with_permissions(id).await?;
    Ok(Json(role))
}

#[axum::debug_handler]
pub async fn create_role(
    State(state): State<AppState>,
    Json(payload): Json<CreateRolePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let role = state.role_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

#[axum::debug_handler]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let role = state.role_service.update(id, payload).await?;
    Ok(Json(role))
}

#[axum::debug_handler]
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.role_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn assign_permission(
    State(state): State<AppState>,
    Path((role_id, permission_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    state
        .role_service
        .assign_permission(role_id, permission_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn remove_permission(
    State(state): State<AppState>,
    Path((role_id, permission_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    state
        .role_service
        .remove_permission(role_id, permission_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
