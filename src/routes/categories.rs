use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::category_dto::{CategoryResponse, CreateCategoryPayload, UpdateCategoryPayload},
    dto::IdListPayload,
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories")
    )
)]
#[axum::debug_handler]
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let categories = state.category_service.find_all().await?;
    let response: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found"),
        (status = 404, description = "Category not found")
    )
)]
#[axum::debug_handler]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let category = state.category_service.find_by_id(id).await?;
    Ok(Json(CategoryResponse::from(category)))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Category created"),
        (status = 409, description = "Name already taken")
    )
)]
#[axum::debug_handler]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let category = state.category_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

#[utoipa::path(
    patch,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategoryPayload,
    responses(
        (status = 200, description = "Category updated"),
        (status = 404, description = "Category not found")
    )
)]
#[axum::debug_handler]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let category = state.category_service.update(id, payload).await?;
    Ok(Json(CategoryResponse::from(category)))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.category_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/categories/delete-many",
    request_body = IdListPayload,
    responses(
        (status = 204, description = "All categories deleted"),
        (status = 404, description = "At least one id does not exist; nothing deleted")
    )
)]
#[axum::debug_handler]
pub async fn delete_categories(
    State(state): State<AppState>,
    Json(payload): Json<IdListPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state.category_service.delete_many(&payload.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
