// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;
use validator::ValidationErrors;

/// ストレージ層のエラー
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Subscription already exists: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for StorageError {
    fn from(err: DbErr) -> Self {
        // 一意制約違反は重複登録として区別する
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => StorageError::Duplicate(detail),
            _ => StorageError::Database(err),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Validation failed")]
    ValidationFailure(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ErrorResponse {
    fn new(error_type: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            error: message.clone(),
            message,
            details: None,
            validation_errors: None,
            error_type: error_type.to_string(),
        }
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Storage(StorageError::Duplicate(detail)) => {
                tracing::warn!(detail = %detail, "Duplicate subscription rejected");
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("conflict", "Subscription already exists"),
                )
            }
            AppError::Storage(StorageError::Database(db_err)) => {
                // サーバーログには詳細を出す
                tracing::error!(error = ?db_err, "Database error");

                let details = match &db_err {
                    DbErr::Exec(_) => Some(json!({ "operation": "exec" })),
                    DbErr::Query(_) => Some(json!({ "operation": "query" })),
                    DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                        Some(json!({ "operation": "connect" }))
                    }
                    _ => None,
                };

                let mut response =
                    ErrorResponse::new("database_error", "A database error occurred");
                response.details = details;
                (StatusCode::INTERNAL_SERVER_ERROR, response)
            }
            // 404 は本文なしで返す
            AppError::NotFound(message) => {
                tracing::debug!(message = %message, "Resource not found");
                return StatusCode::NOT_FOUND.into_response();
            }
            AppError::ValidationError(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("validation_error", message),
            ),
            AppError::ValidationFailure(errors) => {
                let field_errors: HashMap<String, Vec<String>> = errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, errors)| {
                        let messages = errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map_or_else(|| "Invalid value".to_string(), |m| m.to_string())
                            })
                            .collect();
                        (field.to_string(), messages)
                    })
                    .collect();

                let mut response = ErrorResponse::new("validation_errors", "Validation failed");
                response.validation_errors = Some(field_errors);
                (StatusCode::BAD_REQUEST, response)
            }
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("bad_request", message),
            ),
        };

        (status, Json(error_response)).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<HashMap<String, Vec<String>>>,
    pub error_type: String,
}
