use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::supplier_dto::{CreateSupplierPayload, UpdateSupplierPayload},
    dto::IdListPayload,
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_suppliers(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let suppliers = state.supplier_service.find_all().await?;
    Ok(Json(suppliers))
}

#[axum::debug_handler]
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let supplier = state.supplier_service.find_by_id(id).await?;
    Ok(Json(supplier))
}

#[axum::debug_handler]
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(payload): Json<CreateSupplierPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let supplier = state.supplier_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

#[axum::debug_handler]
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let supplier = state.supplier_service.update(id, payload).await?;
    Ok(Json(supplier))
}

#[axum::debug_handler]
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.supplier_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_suppliers(
    State(state): State<AppState>,
    Json(payload): Json<IdListPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state.supplier_service.delete_many(&payload.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
