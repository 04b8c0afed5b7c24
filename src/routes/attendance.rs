use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::attendance_dto::{
        AttendanceListQuery, ClockInPayload, ClockOutPayload, UpdateAttendancePayload,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/attendance/clock-in",
    request_body = ClockInPayload,
    responses(
        (status = 201, description = "Attendance opened for the day"),
        (status = 409, description = "User already clocked in for this date")
    )
)]
#[axum::debug_handler]
pub async fn clock_in(
    State(state): State<AppState>,
    Json(payload): Json<ClockInPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let attendance = state.attendance_service.clock_in(payload).await?;
    Ok((StatusCode::CREATED, Json(attendance)))
}

#[utoipa::path(
    post,
    path = "/api/attendance/{id}/clock-out",
    params(("id" = Uuid, Path, description = "Attendance record ID")),
    request_body = ClockOutPayload,
    responses(
        (status = 200, description = "Attendance closed, hours computed"),
        (status = 409, description = "Already clocked out")
    )
)]
#[axum::debug_handler]
pub async fn clock_out(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClockOutPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let attendance = state.attendance_service.clock_out(id, payload).await?;
    Ok(Json(attendance))
}

#[axum::debug_handler]
pub async fn get_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let attendance = state.attendance_service.find_by_id(id).await?;
    Ok(Json(attendance))
}

/// Filtered reads: by user, by date, by status, by date range.
#[axum::debug_handler]
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(query): Query<AttendanceListQuery>,
) -> Result<impl IntoResponse> {
    let records = state.attendance_service.list(query).await?;
    Ok(Json(records))
}

#[axum::debug_handler]
pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAttendancePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let attendance = state.attendance_service.update(id, payload).await?;
    Ok(Json(attendance))
}

#[axum::debug_handler]
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.attendance_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
