//! Error types for the catalog server

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Machine-readable error kind carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MalformedInput,
    MissingField,
    InvalidRange,
    InvalidField,
    NotFound,
    DuplicateRelationship,
    MethodNotAllowed,
    Unexpected,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate relationship: {0}")]
    DuplicateRelationship(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable message
    pub error: String,
    pub kind: ErrorKind,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MalformedInput(_) => ErrorKind::MalformedInput,
            AppError::MissingField(_) => ErrorKind::MissingField,
            AppError::InvalidRange(_) => ErrorKind::InvalidRange,
            AppError::Validation(_) => ErrorKind::InvalidField,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::DuplicateRelationship(_) => ErrorKind::DuplicateRelationship,
            AppError::MethodNotAllowed(_) => ErrorKind::MethodNotAllowed,
            AppError::Database(_) | AppError::Internal(_) => ErrorKind::Unexpected,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedInput(_)
            | AppError::MissingField(_)
            | AppError::InvalidRange(_)
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateRelationship(_) => StatusCode::CONFLICT,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let message = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "An unexpected error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An unexpected error occurred".to_string()
            }
            AppError::MalformedInput(msg)
            | AppError::MissingField(msg)
            | AppError::InvalidRange(msg)
            | AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::DuplicateRelationship(msg)
            | AppError::MethodNotAllowed(msg) => msg,
        };

        (status, Json(ErrorResponse { error: message, kind })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(_) => {
                AppError::MalformedInput("Invalid JSON format.".to_string())
            }
            other => AppError::MalformedInput(other.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        // Ids are integers; anything else cannot name an existing row
        AppError::NotFound(rejection.body_text())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut missing = Vec::new();
        let mut invalid = Vec::new();

        for (field, field_errors) in errors.field_errors() {
            let field: &str = field.as_ref();
            for error in field_errors.iter() {
                if error.code == "required" {
                    missing.push(field.to_string());
                } else {
                    let detail = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    invalid.push(detail);
                }
            }
        }

        if !missing.is_empty() {
            missing.sort();
            missing.dedup();
            return AppError::MissingField(format!(
                "Missing required fields: {}.",
                missing.join(" and ")
            ));
        }

        invalid.sort();
        AppError::Validation(invalid.join("; "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(AppError::MissingField("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidRange("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::DuplicateRelationship("x".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::MethodNotAllowed("x".into()).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let response = AppError::Internal("pool exhausted".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn required_validation_becomes_missing_field() {
        let mut errors = ValidationErrors::new();
        errors.add("book_id", validator::ValidationError::new("required"));
        errors.add("author_id", validator::ValidationError::new("required"));

        match AppError::from(errors) {
            AppError::MissingField(msg) => {
                assert_eq!(msg, "Missing required fields: author_id and book_id.")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn other_validation_becomes_invalid_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", validator::ValidationError::new("length"));
        assert_eq!(AppError::from(errors).kind(), ErrorKind::InvalidField);
    }
}
