use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::product_dto::{CreateProductPayload, ProductListQuery, UpdateProductPayload},
    dto::IdListPayload,
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse> {
    let products = state.product_service.list(query).await?;
    Ok(Json(products))
}

#[axum::debug_handler]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let product = state.product_service.find_by_id(id).await?;
    Ok(Json(product))
}

#[axum::debug_handler]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let product = state.product_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[axum::debug_handler]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let product = state.product_service.update(id, payload).await?;
    Ok(Json(product))
}

#[axum::debug_handler]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.product_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_products(
    State(state): State<AppState>,
    Json(payload): Json<IdListPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state.product_service.delete_many(&payload.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
