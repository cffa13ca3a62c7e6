// src/handlers/reports.rs

use axum::{extract::State, Json};

use crate::{
    config::AppState,
    models::reports::{DashboardSummary, InvoiceReport, ProductReport, StockReport},
};

// KPIs da tela inicial
#[utoipa::path(
    get,
    path = "/api/reports/dashboard",
    tag = "Reports",
    security(("api_jwt" = [])),
    responses((status = 200, body = DashboardSummary))
)]
pub async fn get_dashboard_summary(State(app_state): State<AppState>) -> Json<DashboardSummary> {
    Json(app_state.report_service.dashboard_summary().await)
}

#[utoipa::path(
    get,
    path = "/api/reports/products",
    tag = "Reports",
    security(("api_jwt" = [])),
    responses((status = 200, body = ProductReport))
)]
pub async fn get_product_report(State(app_state): State<AppState>) -> Json<ProductReport> {
    Json(app_state.report_service.product_report().await)
}

#[utoipa::path(
    get,
    path = "/api/reports/stock",
    tag = "Reports",
    security(("api_jwt" = [])),
    responses((status = 200, body = StockReport))
)]
pub async fn get_stock_report(State(app_state): State<AppState>) -> Json<StockReport> {
    Json(app_state.report_service.stock_report().await)
}

#[utoipa::path(
    get,
    path = "/api/reports/invoices",
    tag = "Reports",
    security(("api_jwt" = [])),
    responses((status = 200, body = InvoiceReport))
)]
pub async fn get_invoice_report(State(app_state): State<AppState>) -> Json<InvoiceReport> {
    Json(app_state.report_service.invoice_report().await)
}
