use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{dto::sale_dto::CreateSalePayload, error::Result, AppState};

#[axum::debug_handler]
pub async fn list_sales(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let sales = state.sale_service.find_all().await?;
    Ok(Json(sales))
}

#[axum::debug_handler]
pub async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let sale = state.sale_service.find_by_id(id).await?;
    Ok(Json(sale))
}

#[axum::debug_handler]
pub async fn create_sale(
    State(state): State<AppState>,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let sale = state.sale_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

#[axum::debug_handler]
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.sale_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
