// src/application/error_handling.rs
//
// Error Handling for Commands
//
// - Maps internal errors to user-facing responses
// - Never exposes storage internals; those are logged instead

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for callers of the command layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input or violated invariant (400)
    Validation,

    /// Database/persistence error (500)
    Database,

    /// Bad runtime configuration (500)
    Configuration,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found", None),

            AppError::Validation(domain_error) => Self::new(
                ErrorType::Validation,
                "Validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(ErrorType::Database, "Storage access failed", Some(io_error.to_string()))
            }

            AppError::Config(message) => {
                Self::new(ErrorType::Configuration, "Invalid configuration", Some(message))
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}
