// src/common/error.rs

use thiserror::Error;

// Todo erro que sai da camada de dados passa por aqui.
// A mensagem do `Display` é o que a interface mostra no toast de falha.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Campo inválido '{field}': {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    // "company not found", "partner not found", "pipeline item not found"
    #[error("{0}")]
    NotFound(String),

    #[error("Resposta inválida da persistência: {0}")]
    MalformedResponse(String),

    #[error("Registro duplicado: {0}")]
    UniqueConstraintViolation(String),

    #[error("Erro de banco de dados: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Erro ao rodar migrações: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{what} not found"))
    }

    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        AppError::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Converte violação de UNIQUE do banco num erro amigável.
    pub fn from_write(e: sqlx::Error, name: &str) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::UniqueConstraintViolation(format!("O nome '{}' já existe.", name));
            }
        }
        AppError::Database(e)
    }
}
