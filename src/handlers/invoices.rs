// src/handlers/invoices.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::invoice::{CreateInvoicePayload, Invoice},
};

#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = "Invoices",
    security(("api_jwt" = [])),
    responses((status = 200, body = [Invoice]))
)]
pub async fn get_all_invoices(State(app_state): State<AppState>) -> Json<Vec<Invoice>> {
    Json(app_state.invoice_service.list_invoices().await)
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    security(("api_jwt" = [])),
    responses((status = 200, body = Invoice), (status = 404, description = "Fatura não encontrada"))
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, AppError> {
    Ok(Json(app_state.invoice_service.get_invoice(id).await?))
}

// Criar a fatura também dá baixa no estoque de cada item, numa unidade
// lógica só; se algo falhar, nada fica gravado.
#[utoipa::path(
    post,
    path = "/api/invoices",
    tag = "Invoices",
    request_body = CreateInvoicePayload,
    security(("api_jwt" = [])),
    responses(
        (status = 201, body = Invoice),
        (status = 400, description = "Item com produto inexistente ou quantidade inválida"),
    )
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let invoice = app_state.invoice_service.create_invoice(payload, &user).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    security(("api_jwt" = [])),
    responses((status = 204), (status = 404, description = "Fatura não encontrada"))
)]
pub async fn delete_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.invoice_service.delete_invoice(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// PDF de uma fatura, nomeado pelo número (INV-2025-001.pdf)
#[utoipa::path(
    get,
    path = "/api/invoices/{id}/pdf",
    tag = "Invoices",
    security(("api_jwt" = [])),
    responses(
        (status = 200, description = "PDF da fatura", content_type = "application/pdf"),
        (status = 404, description = "Fatura não encontrada"),
    )
)]
pub async fn download_invoice_pdf(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.invoice_service.get_invoice(id).await?;
    let pdf = app_state.document_service.generate_invoice_pdf(id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.pdf\"", invoice.invoice_no),
            ),
        ],
        pdf,
    ))
}
