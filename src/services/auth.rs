// src/services/auth.rs

use std::sync::Arc;

use bcrypt::verify;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        activity::ActivityLogEntry,
        auth::{AuthResponse, Claims, UserView},
    },
    store::RecordStore,
};

// A sessão do operador. Existe NO MÁXIMO uma por processo: um novo login
// substitui a anterior, e o prazo de inatividade corre sobre `last_activity`.
#[derive(Debug, Clone)]
struct ActiveSession {
    token: String,
    user: UserView,
    last_activity: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<RecordStore>,
    jwt_secret: String,
    session: Arc<RwLock<Option<ActiveSession>>>,
}

impl AuthService {
    pub fn new(store: Arc<RecordStore>, jwt_secret: String) -> Self {
        Self {
            store,
            jwt_secret,
            session: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let users = self.store.get_users().await;

        // Comparação exata e case-sensitive do e-mail
        let user = users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado (bcrypt é pesado)
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
        ?;

        if !is_password_valid {
            // Falha de login não cria sessão NEM entrada de auditoria
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(user.id)?;
        let now = Utc::now();

        // lastLogin + trilha de auditoria na mesma unidade de trabalho
        let view = self
            .store
            .mutate(|db| {
                let stored = db
                    .users
                    .iter_mut()
                    .find(|u| u.id == user.id)
                    .ok_or(AppError::NotFound("Usuário"))?;
                stored.last_login = Some(now);

                let view = UserView::from(&*stored);
                db.logs.push(ActivityLogEntry::new(
                    view.id,
                    "Login",
                    "User",
                    format!("{} logged in", view.name),
                ));
                Ok(view)
            })
            .await?;

        // Um novo login derruba qualquer sessão anterior
        let mut session = self.session.write().await;
        *session = Some(ActiveSession {
            token: token.clone(),
            user: view.clone(),
            last_activity: now,
        });

        Ok(AuthResponse { token, user: view })
    }

    pub async fn logout(&self, user: &UserView) -> Result<(), AppError> {
        self.store
            .mutate(|db| {
                db.logs.push(ActivityLogEntry::new(
                    user.id,
                    "Logout",
                    "User",
                    format!("{} logged out", user.name),
                ));
                Ok(())
            })
            .await?;

        *self.session.write().await = None;
        Ok(())
    }

    // Valida o token de uma requisição autenticada. Cada chamada conta
    // como interação qualificada: ou renova o prazo de inatividade, ou
    // constata que ele estourou e encerra a sessão ali mesmo (com a
    // entrada de auditoria exigida pela transição autenticado → anônimo).
    pub async fn validate_token(&self, token: &str) -> Result<UserView, AppError> {
        let validation = Validation::default();
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let timeout_minutes = self.store.get_settings().await.session_timeout_minutes;

        let mut guard = self.session.write().await;

        let (token_matches, last_activity, user) = match guard.as_ref() {
            Some(s) => (s.token == token, s.last_activity, s.user.clone()),
            None => return Err(AppError::InvalidToken),
        };
        if !token_matches {
            // Sessão substituída por um login mais recente
            return Err(AppError::InvalidToken);
        }

        let now = Utc::now();
        if now - last_activity > Duration::minutes(timeout_minutes as i64) {
            *guard = None;
            drop(guard);

            self.store
                .mutate(|db| {
                    db.logs.push(ActivityLogEntry::new(
                        user.id,
                        "Logout",
                        "User",
                        format!("{} logged out (session expired)", user.name),
                    ));
                    Ok(())
                })
                .await?;

            return Err(AppError::SessionExpired);
        }

        if let Some(s) = guard.as_mut() {
            s.last_activity = now;
        }
        Ok(user)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
