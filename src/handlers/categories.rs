// src/handlers/categories.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::inventory::{Category, CategoryPayload},
};

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categories",
    security(("api_jwt" = [])),
    responses((status = 200, body = [Category]))
)]
pub async fn get_all_categories(State(app_state): State<AppState>) -> Json<Vec<Category>> {
    Json(app_state.inventory_service.list_categories().await)
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Categories",
    request_body = CategoryPayload,
    security(("api_jwt" = [])),
    responses((status = 201, body = Category), (status = 409, description = "Nome duplicado"))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let category = app_state
        .inventory_service
        .create_category(payload, &user)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "Categories",
    request_body = CategoryPayload,
    security(("api_jwt" = [])),
    responses((status = 200, body = Category), (status = 404, description = "Categoria não encontrada"))
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let category = app_state
        .inventory_service
        .update_category(id, payload, &user)
        .await?;

    Ok((StatusCode::OK, Json(category)))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Categories",
    security(("api_jwt" = [])),
    responses((status = 204), (status = 404, description = "Categoria não encontrada"))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.inventory_service.delete_category(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
