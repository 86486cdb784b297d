//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// Mensaje de acceso denegado por rol insuficiente
pub const ACCESS_DENIED: &str = "Access denied. Insufficient permissions.";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Server error" }),
                )
            }

            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({ "errors": flatten_validation_errors(&e) }),
            ),

            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, json!({ "message": msg }))
            }

            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, json!({ "message": msg })),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),

            // Las violaciones de unicidad se reportan como 400 con mensaje descriptivo
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),

            AppError::Hash(msg) => {
                tracing::error!("Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Server error" }),
                )
            }

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Aplanar errores de validación al formato `[{field, message}]` de la API
fn flatten_validation_errors(errors: &ValidationErrors) -> Vec<serde_json::Value> {
    let mut entries = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            entries.push(json!({ "field": field, "message": message }));
        }
    }
    entries
}

/// Función helper para crear un error de validación de un solo campo
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    let mut error = ValidationError::new("custom");
    error.message = Some(std::borrow::Cow::Borrowed(message));

    let mut errors = ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para acumular errores de validación de varios campos
pub fn validation_errors(fields: &[(&'static str, &'static str)]) -> AppError {
    let mut errors = ValidationErrors::new();
    for (field, message) in fields {
        let mut error = ValidationError::new("custom");
        error.message = Some(std::borrow::Cow::Borrowed(message));
        errors.add(field, error);
    }
    AppError::Validation(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_carries_message() {
        let error = validation_error("amount", "Valid amount is required");
        match error {
            AppError::Validation(errors) => {
                let flattened = flatten_validation_errors(&errors);
                assert_eq!(flattened.len(), 1);
                assert_eq!(flattened[0]["field"], "amount");
                assert_eq!(flattened[0]["message"], "Valid amount is required");
            }
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn test_validation_errors_accumulates_fields() {
        let error = validation_errors(&[
            ("amount", "Valid amount is required"),
            ("method", "Payment method is required"),
        ]);
        match error {
            AppError::Validation(errors) => {
                assert_eq!(flatten_validation_errors(&errors).len(), 2);
            }
            _ => panic!("expected validation error"),
        }
    }
}
