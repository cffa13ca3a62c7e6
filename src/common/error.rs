use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Três famílias (espelhando o que as operações podem devolver):
// validação, "não encontrado" e autenticação. O resto é infraestrutura.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Referência que não resolve (produto de uma fatura, id inexistente...)
    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Sessão expirada por inatividade")]
    SessionExpired,

    #[error("Acesso negado")]
    AccessDenied,

    #[error("SKU já existe")]
    SkuAlreadyExists,

    #[error("Categoria já existe")]
    CategoryAlreadyExists,

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Falha ao ler/gravar o arquivo de dados
    #[error("Erro de armazenamento: {0}")]
    StorageError(#[from] std::io::Error),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NotFound(entity) => {
                let body = Json(json!({ "error": format!("{} não encontrado(a).", entity) }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos."),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente."),
            AppError::SessionExpired => (StatusCode::UNAUTHORIZED, "Sessão expirada por inatividade."),
            AppError::AccessDenied => (StatusCode::FORBIDDEN, "Apenas Super Admins podem acessar este recurso."),
            AppError::SkuAlreadyExists => (StatusCode::CONFLICT, "Já existe um produto com este SKU."),
            AppError::CategoryAlreadyExists => (StatusCode::CONFLICT, "Já existe uma categoria com este nome."),

            // Todos os outros erros (StorageError, InternalServerError...) viram 500.
            // O `#[from]` cuidou da conversão, agora só precisamos tratar o que fazer com eles.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
