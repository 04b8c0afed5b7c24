use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::schedule_dto::{CreateSchedulePayload, UpdateSchedulePayload, WeeklySchedulePayload},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_schedules(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let schedules = state.schedule_service.find_all().await?;
    Ok(Json(schedules))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let schedule = state.schedule_service.find_by_id(id).await?;
    Ok(Json(schedule))
}

#[axum::debug_handler]
pub async fn list_user_schedules(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let schedules = state.schedule_service.find_by_user(user_id).await?;
    Ok(Json(schedules))
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(payload): Json<CreateSchedulePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let schedule = state.schedule_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSchedulePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let schedule = state.schedule_service.update(id, payload).await?;
    Ok(Json(schedule))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.schedule_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn generate_weekly_schedule(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<WeeklySchedulePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let schedules = state
        .schedule_service
        .generate_weekly(user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(schedules)))
}

#[axum::debug_handler]
pub async fn copy_previous_week(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let schedules = state
        .schedule_service
        .copy_from_previous_week(user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(schedules)))
}
