// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        auth::UserView,
        settings::{Settings, UpdateSettingsPayload},
    },
};

// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    security(("api_jwt" = [])),
    responses((status = 200, body = Settings))
)]
pub async fn get_settings(State(app_state): State<AppState>) -> Json<Settings> {
    Json(app_state.store.get_settings().await)
}

// PUT /api/settings (atualização parcial: só os campos enviados mudam)
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = UpdateSettingsPayload,
    security(("api_jwt" = [])),
    responses((status = 200, body = Settings))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    Json(payload): Json<UpdateSettingsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let updated = app_state
        .store
        .mutate(move |db| {
            if let Some(company_name) = payload.company_name {
                db.settings.company_name = company_name;
            }
            if let Some(gst_rate) = payload.gst_rate {
                db.settings.gst_rate = gst_rate;
            }
            if let Some(currency) = payload.currency {
                db.settings.currency = currency;
            }
            if let Some(format) = payload.invoice_number_format {
                db.settings.invoice_number_format = format;
            }
            if let Some(minutes) = payload.session_timeout_minutes {
                db.settings.session_timeout_minutes = minutes;
            }
            Ok(db.settings.clone())
        })
        .await?;

    Ok((StatusCode::OK, Json(updated)))
}

// Backup completo em JSON. Usuários saem como projeção pública, sem
// hash de senha: o backup é para conferência, não para restore.
#[utoipa::path(
    get,
    path = "/api/settings/backup",
    tag = "Settings",
    security(("api_jwt" = [])),
    responses((status = 200, description = "Backup completo do banco em JSON"))
)]
pub async fn download_backup(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.store.snapshot().await;
    let users: Vec<UserView> = db.users.iter().map(UserView::from).collect();

    Json(json!({
        "products": db.products,
        "categories": db.categories,
        "invoices": db.invoices,
        "catalogues": db.catalogues,
        "users": users,
        "logs": db.logs,
        "stockMovements": db.stock_movements,
        "settings": db.settings,
    }))
}

// Volta tudo ao dataset inicial (a sessão atual sobrevive; os dados não).
#[utoipa::path(
    post,
    path = "/api/settings/reset",
    tag = "Settings",
    security(("api_jwt" = [])),
    responses((status = 200, description = "Dados restaurados para o seed"))
)]
pub async fn reset_data(State(app_state): State<AppState>) -> Result<StatusCode, AppError> {
    app_state.store.reset().await?;
    Ok(StatusCode::OK)
}
