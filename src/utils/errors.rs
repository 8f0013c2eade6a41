//! Sistema de manejo de errores
//!
//! Este módulo define la taxonomía cerrada de errores del servicio
//! y su conversión a respuestas HTTP apropiadas.

use std::fmt::Display;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Contexto legible más un detalle verificable por máquina
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub context: String,
    pub detail: String,
}

impl ErrorInfo {
    pub fn new(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            detail: detail.into(),
        }
    }
}

/// Problema de validación sobre un campo concreto del cuerpo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

/// Tipo de error, sin payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Internal,
    Duplicate,
    Validation,
    NotFound,
    ReferenceNotFound,
    IncorrectValue,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Internal => "InternalError",
            ErrorKind::Duplicate => "DuplicateError",
            ErrorKind::Validation => "ValidationError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::ReferenceNotFound => "ReferenceNotFoundError",
            ErrorKind::IncorrectValue => "IncorrectValueError",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Internal => "INTERNAL_ERROR",
            ErrorKind::Duplicate => "DUPLICATE",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::ReferenceNotFound => "REFERENCE_NOT_FOUND",
            ErrorKind::IncorrectValue => "INCORRECT_VALUE",
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Duplicate => StatusCode::CONFLICT,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ReferenceNotFound => StatusCode::NOT_FOUND,
            ErrorKind::IncorrectValue => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Errores principales de la aplicación
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// El mensaje es público; la causa privada ya quedó en los logs.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Duplicate: {} {}", .0.context, .0.detail)]
    Duplicate(ErrorInfo),

    #[error("Validation error: {} invalid field(s)", .0.len())]
    Validation(Vec<FieldIssue>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Reference not found: {} {}", .0.context, .0.detail)]
    ReferenceNotFound(ErrorInfo),

    #[error("Incorrect value: {} {}", .0.context, .0.detail)]
    IncorrectValue(ErrorInfo),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Internal(_) => ErrorKind::Internal,
            AppError::Duplicate(_) => ErrorKind::Duplicate,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::ReferenceNotFound(_) => ErrorKind::ReferenceNotFound,
            AppError::IncorrectValue(_) => ErrorKind::IncorrectValue,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut issues: Vec<FieldIssue> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| FieldIssue {
                    path: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code)),
                })
            })
            .collect();

        issues.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.message.cmp(&b.message)));
        AppError::Validation(issues)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(vec![FieldIssue {
            path: String::new(),
            message: rejection.body_text(),
        }])
    }
}

/// Respuesta de error para la API
#[derive(Debug, Serialize)]
struct ErrorResponse {
    #[serde(rename = "type")]
    kind: &'static str,
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();

        let (message, details) = match self {
            // Ya registrado en `internal_error`
            AppError::Internal(msg) => (msg, None),
            AppError::Validation(issues) => {
                warn!("Validation error: {} invalid field(s)", issues.len());
                ("The provided data is invalid".to_string(), Some(json!(issues)))
            }
            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                (msg, None)
            }
            AppError::Duplicate(info)
            | AppError::ReferenceNotFound(info)
            | AppError::IncorrectValue(info) => {
                warn!("{}: {} {}", kind.name(), info.context, info.detail);
                (info.context.clone(), Some(json!(info)))
            }
        };

        let body = ErrorResponse {
            kind: kind.name(),
            code: kind.code(),
            message,
            details,
        };

        (kind.status_code(), Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Registra la causa interna por separado del mensaje público y devuelve
/// un `AppError::Internal` que solo lleva el mensaje público.
pub fn internal_error(message: impl Into<String>, reason: impl Display) -> AppError {
    let message = message.into();
    error!(public_message = %message, reason = %reason, "❌ Internal failure");
    AppError::Internal(message)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: impl Display) -> AppError {
    AppError::NotFound(format!("{} not found: {}", resource, id))
}

/// Indica si el error de la base de datos es una violación de unicidad
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::Internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorKind::Duplicate.status_code(), StatusCode::CONFLICT);
        assert_eq!(ErrorKind::Validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorKind::ReferenceNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorKind::IncorrectValue.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_kind_names() {
        let err = AppError::IncorrectValue(ErrorInfo::new("ctx", "detail"));
        assert_eq!(err.kind().name(), "IncorrectValueError");
        assert_eq!(internal_error("public", "secret").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_internal_error_keeps_only_public_message() {
        let err = internal_error("Fail to read vehicle.", "password authentication failed");
        assert_eq!(err, AppError::Internal("Fail to read vehicle.".to_string()));
    }

    #[test]
    fn test_validation_errors_are_flattened() {
        let mut errors = ValidationErrors::new();
        let mut license = ValidationError::new("regex");
        license.message = Some("Invalid license ID format.".into());
        errors.add("licenseId", license);
        errors.add("firstName", ValidationError::new("length"));

        let AppError::Validation(issues) = AppError::from(errors) else {
            panic!("expected a validation error");
        };

        assert_eq!(
            issues,
            vec![
                FieldIssue {
                    path: "firstName".to_string(),
                    message: "Invalid value (length)".to_string(),
                },
                FieldIssue {
                    path: "licenseId".to_string(),
                    message: "Invalid license ID format.".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
