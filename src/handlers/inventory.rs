// src/handlers/inventory.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::inventory::{Product, StockAdjustmentPayload, StockMovement},
};

// --- Handler: ajuste manual de estoque ---
// Mutação + movimentação + auditoria acontecem numa unidade só no service.
#[utoipa::path(
    post,
    path = "/api/inventory/adjust",
    tag = "Inventory",
    request_body = StockAdjustmentPayload,
    security(("api_jwt" = [])),
    responses(
        (status = 200, body = StockMovement),
        (status = 404, description = "Produto não encontrado"),
    )
)]
pub async fn adjust_stock(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<StockAdjustmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let movement = app_state
        .inventory_service
        .adjust_stock(payload, &user)
        .await?;

    Ok((StatusCode::OK, Json(movement)))
}

// Histórico completo de movimentações (filtro é problema do painel)
#[utoipa::path(
    get,
    path = "/api/inventory/movements",
    tag = "Inventory",
    security(("api_jwt" = [])),
    responses((status = 200, body = [StockMovement]))
)]
pub async fn get_stock_movements(State(app_state): State<AppState>) -> Json<Vec<StockMovement>> {
    Json(app_state.inventory_service.list_movements().await)
}

// Alertas: produtos no nível de reposição ou abaixo (inclui zerados)
#[utoipa::path(
    get,
    path = "/api/inventory/low-stock",
    tag = "Inventory",
    security(("api_jwt" = [])),
    responses((status = 200, body = [Product]))
)]
pub async fn get_low_stock(State(app_state): State<AppState>) -> Json<Vec<Product>> {
    Json(app_state.inventory_service.low_stock_products().await)
}
