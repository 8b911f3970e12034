//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Schema configuration errors. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("field '{field}': foreign key '{definition}' must have the form fk:<table>.<column>")]
    InvalidForeignKey { field: String, definition: String },
    #[error("field '{field}': enum requires a non-empty 'values' list")]
    EmptyEnum { field: String },
    #[error("field '{field}': unknown generator '{path}'")]
    UnknownGenerator { field: String, path: String },
    #[error("field '{field}': generator '{path}': {reason}")]
    InvalidGeneratorOptions {
        field: String,
        path: String,
        reason: String,
    },
    #[error("field '{field}': unsupported field type '{kind}'")]
    UnknownFieldType { field: String, kind: String },
    #[error("invalid identifier: '{0}'")]
    InvalidIdentifier(String),
    #[error("duplicate table: {0}")]
    DuplicateTable(String),
    #[error("table '{0}' declares more than one primary key")]
    MultiplePrimaryKeys(String),
    #[error("integrity: {table}.{field} references undefined table '{target}'")]
    UndefinedTarget {
        table: String,
        field: String,
        target: String,
    },
    #[error("integrity: {table}.{field} references undefined column '{target}.{column}'")]
    UndefinedTargetColumn {
        table: String,
        field: String,
        target: String,
        column: String,
    },
    #[error("integrity: {table}.{field} references '{target}.{column}', which is not the key column of '{target}'")]
    NonKeyTarget {
        table: String,
        field: String,
        target: String,
        column: String,
    },
    #[error("config load: {0}")]
    Load(String),
}

impl ConfigError {
    /// True for foreign keys pointing outside the schema or at a non-key column.
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            ConfigError::UndefinedTarget { .. }
                | ConfigError::UndefinedTargetColumn { .. }
                | ConfigError::NonKeyTarget { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("store: {0}")]
    Store(#[from] sqlx::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Store(e) => match e {
                sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "not_found"),
                // Constraint violations and type mismatches reported by the engine.
                sqlx::Error::Database(_) => (StatusCode::BAD_REQUEST, "store_error"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            },
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
