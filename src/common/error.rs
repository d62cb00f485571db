use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Intervalo de datas inválido")]
    InvalidDateRange,

    #[error("Escalação não encontrada")]
    AssignmentNotFound,

    #[error("Turno não encontrado")]
    ShiftNotFound,

    #[error("Cabeçalho x-tenant-id ausente")]
    MissingTenantId,

    #[error("Cabeçalho x-tenant-id inválido")]
    InvalidTenantId,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Falha na montagem da planilha de exportação
    #[error("Erro ao gerar o CSV: {0}")]
    ExportError(#[from] csv::Error),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
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
            AppError::InvalidDateRange => (
                StatusCode::BAD_REQUEST,
                "A data inicial não pode ser posterior à data final.",
            ),
            AppError::AssignmentNotFound => (StatusCode::NOT_FOUND, "Escalação não encontrada."),
            AppError::ShiftNotFound => (StatusCode::NOT_FOUND, "Turno não encontrado."),
            AppError::MissingTenantId => (
                StatusCode::BAD_REQUEST,
                "O cabeçalho x-tenant-id é obrigatório.",
            ),
            AppError::InvalidTenantId => (
                StatusCode::BAD_REQUEST,
                "Cabeçalho x-tenant-id inválido (não é um UUID).",
            ),

            // Todos os outros (DatabaseError, ExportError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
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
