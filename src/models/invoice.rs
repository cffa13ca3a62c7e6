// src/models/invoice.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validators::validate_not_negative;

// Item de fatura com preço "congelado" no momento da venda.
// Se o produto mudar de preço depois, a fatura não muda.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub product_id: Uuid,
    pub qty: u32,

    #[schema(example = "5000.00")]
    pub price: Decimal,
}

// --- Fatura ---
// Imutável depois de criada; a única operação posterior é a exclusão.
// `total` é o subtotal bruto (nome herdado do formato de exportação),
// `final_amount` já carrega desconto + imposto.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,

    #[schema(example = "INV-2025-001")]
    pub invoice_no: String,

    pub items: Vec<InvoiceItem>,

    #[schema(example = "13000.00")]
    pub total: Decimal,

    #[schema(example = "1000.00")]
    pub discount: Decimal,

    #[schema(example = "2160.00")]
    pub tax: Decimal,

    #[schema(example = "14160.00")]
    pub final_amount: Decimal,

    pub customer_name: String,
    pub customer_contact: Option<String>,

    pub created_at: DateTime<Utc>,
}

// Resultado do cálculo puro de totais (sem arredondamento: valores ficam
// exatos no armazenamento, só arredondamos em exibição).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub final_amount: Decimal,
}

// --- Payloads ---

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemPayload {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser de pelo menos 1."))]
    pub qty: u32,

    // Preço unitário congelado na venda (o painel pré-preenche com o
    // preço atual do produto, mas o operador pode ajustar)
    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    #[validate(length(min = 1, message = "O nome do cliente é obrigatório."))]
    pub customer_name: String,

    pub customer_contact: Option<String>,

    #[validate(length(min = 1, message = "A fatura precisa de pelo menos um item."), nested)]
    pub items: Vec<InvoiceItemPayload>,

    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub discount: Decimal,
}
