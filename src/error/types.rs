// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// True for failures of the underlying persistence layer
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AppError::Database(_) | AppError::Pool(_) | AppError::Serialization(_) | AppError::Io(_)
        )
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Other(format!("UUID error: {}", err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = AppError::from(DomainError::MissingField("component_name"));
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required field: component_name"
        );
        assert!(!err.is_storage());
    }

    #[test]
    fn test_storage_errors_keep_cause() {
        let err = AppError::from(rusqlite::Error::InvalidQuery);
        assert!(err.is_storage());
        assert!(err.to_string().starts_with("Database error:"));
    }

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&AppError::NotFound).unwrap();
        assert_eq!(json, "\"Resource not found\"");
    }
}
