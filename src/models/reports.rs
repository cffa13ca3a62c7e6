// src/models/reports.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// DTOs de leitura para o dashboard e a página de relatórios.
// Tudo aqui é derivado do store na hora da consulta, nada é gravado.

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: usize,
    pub total_stock_units: u64,
    pub low_stock_count: usize,
    pub total_invoices: usize,

    // Receita (finalAmount) das faturas do mês corrente
    pub monthly_revenue: Decimal,

    // Σ costPrice × stock
    pub inventory_value: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductReport {
    pub total_products: usize,
    pub total_categories: usize,
    pub featured_products: usize,
    pub category_breakdown: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub total_stock_value: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceReport {
    pub total_invoices: usize,
    pub total_revenue: Decimal,
    pub average_invoice: Decimal,
}
