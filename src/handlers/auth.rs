use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginPayload, UserView},
};

// Handler de login (rota pública)
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, body = AuthResponse),
        (status = 401, description = "Credenciais inválidas"),
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let response = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(response))
}

// Encerra a sessão do operador (e audita a transição)
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    security(("api_jwt" = [])),
    responses((status = 200))
)]
pub async fn logout(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<StatusCode, AppError> {
    app_state.auth_service.logout(&user).await?;
    Ok(StatusCode::OK)
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    security(("api_jwt" = [])),
    responses((status = 200, body = UserView))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<UserView> {
    Json(user)
}
