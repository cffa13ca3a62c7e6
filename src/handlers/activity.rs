// src/handlers/activity.rs

use axum::{extract::State, Json};

use crate::{config::AppState, models::activity::ActivityLogEntry};

// Trilha de auditoria completa, em ordem de inserção.
#[utoipa::path(
    get,
    path = "/api/logs",
    tag = "Activity",
    security(("api_jwt" = [])),
    responses((status = 200, body = [ActivityLogEntry]))
)]
pub async fn get_activity_logs(State(app_state): State<AppState>) -> Json<Vec<ActivityLogEntry>> {
    Json(app_state.store.get_logs().await)
}
