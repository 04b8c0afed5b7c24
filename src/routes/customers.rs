use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::customer_dto::{CreateCustomerPayload, UpdateCustomerPayload},
    dto::IdListPayload,
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_customers(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let customers = state.customer_service.find_all().await?;
    Ok(Json(customers))
}

#[axum::debug_handler]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let customer = state.customer_service.find_by_id(id).await?;
    Ok(Json(customer))
}

#[axum::debug_handler]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let customer = state.customer_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

#[axum::debug_handler]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let customer = state.customer_service.update(id, payload).await?;
    Ok(Json(customer))
}

#[axum::debug_handler]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.customer_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_customers(
    State(state): State<AppState>,
    Json(payload): Json<IdListPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state.customer_service.delete_many(&payload.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
