// src/handlers/users.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::UserView,
};

// Listagem de contas: restrita a Super Admin, como no painel.
// O papel é um conjunto aberto de strings, então a checagem é literal.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("api_jwt" = [])),
    responses(
        (status = 200, body = [UserView]),
        (status = 403, description = "Apenas Super Admins"),
    )
)]
pub async fn get_all_users(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<UserView>>, AppError> {
    if user.role != "Super Admin" {
        return Err(AppError::AccessDenied);
    }

    let users = app_state.store.get_users().await;
    Ok(Json(users.iter().map(UserView::from).collect()))
}
