// src/handlers/products.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::inventory::{Product, ProductPayload},
};

// Filtros da listagem, iguais aos do painel:
// busca por nome/SKU, categoria exata e situação ("in" | "low" | "out").
#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductFilterQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub stock: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GenerateSkuQuery {
    pub category: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SkuResponse {
    pub sku: String,
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(ProductFilterQuery),
    security(("api_jwt" = [])),
    responses((status = 200, body = [Product]))
)]
pub async fn get_all_products(
    State(app_state): State<AppState>,
    Query(filter): Query<ProductFilterQuery>,
) -> Json<Vec<Product>> {
    let products = app_state
        .inventory_service
        .list_products(
            filter.search.as_deref(),
            filter.category.as_deref(),
            filter.stock.as_deref(),
        )
        .await;

    Json(products)
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = ProductPayload,
    security(("api_jwt" = [])),
    responses((status = 201, body = Product), (status = 409, description = "SKU duplicado"))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .inventory_service
        .create_product(payload, &user)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    request_body = ProductPayload,
    security(("api_jwt" = [])),
    responses((status = 200, body = Product), (status = 404, description = "Produto não encontrado"))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .inventory_service
        .update_product(id, payload, &user)
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    security(("api_jwt" = [])),
    responses((status = 204), (status = 404, description = "Produto não encontrado"))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.inventory_service.delete_product(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/products/generate-sku",
    tag = "Products",
    params(GenerateSkuQuery),
    security(("api_jwt" = [])),
    responses((status = 200, body = SkuResponse))
)]
pub async fn generate_sku(
    State(app_state): State<AppState>,
    Query(query): Query<GenerateSkuQuery>,
) -> Result<Json<SkuResponse>, AppError> {
    let sku = app_state.inventory_service.generate_sku(&query.category).await?;
    Ok(Json(SkuResponse { sku }))
}

fn csv_cell(value: &str) -> String {
    // Aspas internas dobradas, célula sempre entre aspas
    format!("\"{}\"", value.replace('"', "\"\""))
}

// Exporta a listagem FILTRADA, com as mesmas colunas do painel.
#[utoipa::path(
    get,
    path = "/api/products/export",
    tag = "Products",
    params(ProductFilterQuery),
    security(("api_jwt" = [])),
    responses((status = 200, description = "CSV dos produtos filtrados", content_type = "text/csv"))
)]
pub async fn export_products_csv(
    State(app_state): State<AppState>,
    Query(filter): Query<ProductFilterQuery>,
) -> impl IntoResponse {
    let products = app_state
        .inventory_service
        .list_products(
            filter.search.as_deref(),
            filter.category.as_deref(),
            filter.stock.as_deref(),
        )
        .await;

    let mut csv = String::from("Name,SKU,Category,Price,Cost Price,Stock,Reorder Level\n");
    for p in &products {
        let row = [
            csv_cell(&p.name),
            csv_cell(&p.sku),
            csv_cell(&p.category),
            csv_cell(&p.price.to_string()),
            csv_cell(&p.cost_price.to_string()),
            csv_cell(&p.stock.to_string()),
            csv_cell(&p.reorder_level.to_string()),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"products_{}.csv\"", Utc::now().timestamp_millis()),
            ),
        ],
        csv,
    )
}
