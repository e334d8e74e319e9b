use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::complaint_api::BackendError;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    // Entrada malformada (ex: e-mail vazio)
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Id referenciado não existe no conjunto em memória
    #[error("{0}")]
    NotFound(String),

    // Operação não permitida no estado atual
    #[error("{0}")]
    Precondition(String),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado: requer o papel '{0}'")]
    Forbidden(&'static str),

    // Falha na API externa de reclamações. Nunca corrompe o estado local.
    #[error("Falha na API de reclamações: {0}")]
    Backend(#[from] BackendError),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

impl AppError {
    pub fn complaint_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Reclamação '{}' não encontrada.", id))
    }

    pub fn officer_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Oficial '{}' não encontrado.", id))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
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
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Precondition(msg) => (StatusCode::CONFLICT, msg),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            ref e @ AppError::Forbidden(_) => (StatusCode::FORBIDDEN, e.to_string()),
            AppError::Backend(ref e) => {
                tracing::warn!("🌐 Erro na API de reclamações: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "A API de reclamações não respondeu corretamente.".to_string(),
                )
            }

            // Todos os outros erros (InternalServerError, Bcrypt) viram 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
