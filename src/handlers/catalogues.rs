// src/handlers/catalogues.rs

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
    models::catalogue::{Catalogue, CreateCataloguePayload},
};

#[utoipa::path(
    get,
    path = "/api/catalogues",
    tag = "Catalogues",
    security(("api_jwt" = [])),
    responses((status = 200, body = [Catalogue]))
)]
pub async fn get_all_catalogues(State(app_state): State<AppState>) -> Json<Vec<Catalogue>> {
    Json(app_state.catalogue_service.list_catalogues().await)
}

#[utoipa::path(
    post,
    path = "/api/catalogues",
    tag = "Catalogues",
    request_body = CreateCataloguePayload,
    security(("api_jwt" = [])),
    responses((status = 201, body = Catalogue))
)]
pub async fn create_catalogue(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateCataloguePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let catalogue = app_state
        .catalogue_service
        .create_catalogue(payload, &user)
        .await?;

    Ok((StatusCode::CREATED, Json(catalogue)))
}

#[utoipa::path(
    delete,
    path = "/api/catalogues/{id}",
    tag = "Catalogues",
    security(("api_jwt" = [])),
    responses((status = 204), (status = 404, description = "Catálogo não encontrado"))
)]
pub async fn delete_catalogue(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.catalogue_service.delete_catalogue(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
