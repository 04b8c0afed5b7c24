use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::notification_dto::{
        CreateNotificationPreferencePayload, UpdateNotificationPreferencePayload,
    },
    dto::IdListPayload,
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_preferences(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let preferences = state.notification_service.find_all().await?;
    Ok(Json(preferences))
}

#[axum::debug_handler]
pub async fn get_preference(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let preference = state.notification_service.find_by_id(id).await?;
    Ok(Json(preference))
}

#[axum::debug_handler]
pub async fn list_user_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let preferences = state.notification_service.find_by_user(user_id).await?;
    Ok(Json(preferences))
}

#[axum::debug_handler]
pub async fn create_preference(
    State(state): State<AppState>,
    Json(payload): Json<CreateNotificationPreferencePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let preference = state.notification_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(preference)))
}

#[axum::debug_handler]
pub async fn update_preference(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNotificationPreferencePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let preference = state.notification_service.update(id, payload).await?;
    Ok(Json(preference))
}

#[axum::debug_handler]
pub async fn delete_preference(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.notification_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_preferences(
    State(state): State<AppState>,
    Json(payload): Json<IdListPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state.notification_service.delete_many(&payload.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
