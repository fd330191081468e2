// src/error.rs - one error type, one JSON shape for every endpoint
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::repositories::RepoError;
use crate::services::image_storage::StorageError;

pub const DUPLICATE_TITLE_MESSAGE: &str =
    "A post with this title already exists. Kindly update the title.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{context}: {cause}")]
    Validation { context: &'static str, cause: String },
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{}", DUPLICATE_TITLE_MESSAGE)]
    DuplicateTitle,
    #[error("{context}: {cause}")]
    Storage { context: &'static str, cause: String },
    #[error("{0}")]
    Internal(String),
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    pub fn validation(context: &'static str, cause: impl Into<String>) -> Self {
        AppError::Validation { context, cause: cause.into() }
    }

    pub fn storage(context: &'static str, cause: impl std::fmt::Display) -> Self {
        AppError::Storage { context, cause: cause.to_string() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::BadRequest(_) => "bad_request",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::DuplicateTitle => "duplicate_title",
            AppError::Storage { .. } => "storage_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn body(&self) -> ErrorBody {
        let (message, details) = match self {
            AppError::Validation { context, cause } | AppError::Storage { context, cause } => {
                (context.to_string(), Some(cause.clone()))
            }
            other => (other.to_string(), None),
        };
        ErrorBody { error: self.kind(), message, details }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateTitle => StatusCode::CONFLICT,
            AppError::Storage { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(_) => AppError::DuplicateTitle,
            other => AppError::storage("Database operation failed", other),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UnsupportedType(_) | StorageError::TooLarge { .. } => {
                AppError::BadRequest(err.to_string())
            }
            other => AppError::storage("Image upload failed", other),
        }
    }
}
