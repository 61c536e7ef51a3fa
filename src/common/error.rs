// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Erro único da aplicação. Os serviços devolvem `AppError` e o Axum o converte em resposta.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Nome de usuário já existe")]
    UsernameAlreadyExists,

    #[error("Registro '{id}' não encontrado em '{collection}'")]
    RecordNotFound { collection: &'static str, id: String },

    #[error("Registro '{id}' já existe em '{collection}'")]
    DuplicateRecordId { collection: &'static str, id: String },

    #[error("Funcionário '{0}' não encontrado")]
    EmployeeNotFound(String),

    #[error("Já existe um ponto aberto para '{employee_id}' em {date}")]
    AttendanceAlreadyOpen { employee_id: String, date: String },

    #[error("Nenhum ponto aberto para '{employee_id}' em {date}")]
    NoOpenAttendance { employee_id: String, date: String },

    #[error("Horário de saída anterior ao de entrada")]
    InvalidTimeRange,

    #[error("Intervalo de datas inválido: {start} > {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Holerite de '{employee_id}' para {month} já foi gerado")]
    SalaryAlreadyGenerated { employee_id: String, month: String },

    #[error("Competência inválida: '{0}' (esperado YYYY-MM)")]
    InvalidPayPeriod(String),

    #[error("Chave de armazenamento inválida: '{0}'")]
    InvalidStorageKey(String),

    #[error("Erro de armazenamento: {0}")]
    StorageError(String),

    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro ao gerar PDF: {0}")]
    PdfError(String),

    #[error("Erro de I/O: {0}")]
    IoError(#[from] std::io::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Helper para erro de validação de um único campo (regras que o derive não cobre).
    pub fn field_error(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut errors = validator::ValidationErrors::new();
        let mut err = validator::ValidationError::new(code);
        err.message = Some(message.into());
        errors.add(field, err);
        AppError::ValidationError(errors)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidTimeRange
            | AppError::InvalidDateRange { .. }
            | AppError::InvalidPayPeriod(_)
            | AppError::InvalidStorageKey(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::UserNotFound
            | AppError::RecordNotFound { .. }
            | AppError::EmployeeNotFound(_)
            | AppError::NoOpenAttendance { .. } => StatusCode::NOT_FOUND,
            AppError::UsernameAlreadyExists
            | AppError::DuplicateRecordId { .. }
            | AppError::AttendanceAlreadyOpen { .. }
            | AppError::SalaryAlreadyGenerated { .. } => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "Um ou mais campos são inválidos.",
                "details": details,
            }));
            return (status, body).into_response();
        }

        // Erros 5xx não expõem detalhes; o `tracing` registra a mensagem completa.
        let message = if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
            "Ocorreu um erro inesperado.".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_map_to_409() {
        let err = AppError::SalaryAlreadyGenerated {
            employee_id: "e1".into(),
            month: "2024-01".into(),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let err = AppError::AttendanceAlreadyOpen {
            employee_id: "e1".into(),
            date: "2024-01-01".into(),
        };
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn field_error_is_a_validation_error() {
        let err = AppError::field_error("endDate", "range", "fim antes do início");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        match err {
            AppError::ValidationError(errors) => {
                assert!(errors.field_errors().contains_key("endDate"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn not_found_record_is_404() {
        let err = AppError::RecordNotFound {
            collection: "employees",
            id: "x".into(),
        };
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
