use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// A single field-level validation failure, reported back to the client.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(Vec<FieldIssue>),

    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Email error: {0}")]
    Email(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Collapses `validator` derive output into our field-issue list.
    pub fn from_validation_errors(errors: &ValidationErrors) -> Self {
        let mut issues = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"));
                issues.push(FieldIssue::new(field, message));
            }
        }
        AppError::Validation(issues)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Validation failed".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Hashing(msg) => {
                tracing::error!("Hashing error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "HASHING_ERROR",
                    "An error occurred while processing credentials".to_string(),
                )
            }
            AppError::Email(msg) => {
                tracing::error!("Email error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EMAIL_ERROR",
                    "An error occurred while sending email".to_string(),
                )
            }
            AppError::Export(msg) => {
                tracing::error!("Export error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "An error occurred while rendering the export".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": {
                "code": code,
                "message": message
            }
        });

        if let AppError::Validation(issues) = &self {
            body["error"]["issues"] = json!(issues);
        }

        (status, Json(body)).into_response()
    }
}
