// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validators::validate_not_negative;

// --- 1. Categorias ---
// Referenciadas pelo NOME a partir do produto (referência fraca, sem FK).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

// --- 2. Produtos ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,

    #[schema(example = "ELEC-0001")]
    pub sku: String,

    // Nome da categoria (referência fraca)
    pub category: String,

    pub description: Option<String>,

    #[schema(example = "75000.00")]
    pub price: Decimal,

    #[schema(example = "65000.00")]
    pub cost_price: Decimal,

    pub stock: u32,
    pub reorder_level: u32,
    pub featured: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    // Status derivado: nunca gravamos isso, sempre calculamos do estoque atual.
    pub fn stock_status(&self) -> StockStatus {
        if self.stock == 0 {
            StockStatus::OutOfStock
        } else if self.stock <= self.reorder_level {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

// --- 3. Movimentações de Estoque (Histórico) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StockAction {
    Added,
    Reduced,
}

// Registro imutável: uma linha por ajuste, nunca editada depois.
// `new_stock` deve reconciliar com `previous_stock` ± `quantity`
// (exceto quando a redução bate no piso zero).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,

    // Snapshot do nome na hora do ajuste (o produto pode ser renomeado/apagado)
    pub product_name: String,

    pub action: StockAction,
    pub quantity: u32,
    pub previous_stock: u32,
    pub new_stock: u32,

    pub reason: Option<String>,

    pub user_id: Uuid,
    pub user_name: String,

    pub timestamp: DateTime<Utc>,
}

// --- Payloads ---

// Criação e edição usam o mesmo formato: o painel envia o formulário completo.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    pub sku: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub cost_price: Decimal,

    #[serde(default)]
    pub stock: u32,

    #[serde(default)]
    pub reorder_level: u32,

    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustmentPayload {
    pub product_id: Uuid,

    pub action: StockAction,

    #[validate(range(min = 1, message = "A quantidade deve ser de pelo menos 1."))]
    pub quantity: u32,

    pub reason: Option<String>,
}
