use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::payment_dto::{CreatePaymentPayload, UpdatePaymentPayload},
    dto::IdListPayload,
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_payments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let payments = state.payment_service.find_all().await?;
    Ok(Json(payments))
}

#[axum::debug_handler]
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let payment = state.payment_service.find_by_id(id).await?;
    Ok(Json(payment))
}

#[axum::debug_handler]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let payment = state.payment_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

#[axum::debug_handler]
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let payment = state.payment_service.update(id, payload).await?;
    Ok(Json(payment))
}

#[axum::debug_handler]
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.payment_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_payments(
    State(state): State<AppState>,
    Json(payload): Json<IdListPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state.payment_service.delete_many(&payload.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
