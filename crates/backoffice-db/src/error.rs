//! Storage errors and their HTTP mapping.

use backoffice_core::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// The addressed record does not exist. Carries the entity name.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A uniqueness rule was violated. Carries the client-facing message.
    #[error("{0}")]
    Conflict(String),

    /// A referenced record (enterprise, employee) does not exist.
    #[error("{0}")]
    InvalidReference(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::Database(err.to_string())
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(_) => AppError::not_found(err),
            DbError::Conflict(_) | DbError::InvalidReference(_) => AppError::bad_request(err),
            DbError::Database(details) => {
                tracing::error!(error = %details, "Database operation failed");
                AppError::internal_error("Database error")
            }
        }
    }
}
