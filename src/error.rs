use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::StorageError;

/// Message rendered for every internal failure; details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, Vec<String>>,
    },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    Conflict { message: String },
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
    /// `message` is for logs only; clients always see [`INTERNAL_ERROR_MESSAGE`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, fields) = match self {
            AppError::Validation { message, fields } => (
                StatusCode::BAD_REQUEST,
                message,
                (!fields.is_empty()).then_some(fields),
            ),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message, None),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message, None),
            AppError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
                None,
            ),
        };

        (status, Json(ErrorBody { error, fields })).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (field, field_errors) in errors.field_errors() {
            let messages = field_errors
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("field {field} is not valid"),
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }

        let message = fields
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");

        AppError::Validation { message, fields }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Failed to decode request body");
        AppError::bad_request("failed to decode request body")
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::AlreadyExists => AppError::conflict("alias already exists"),
            StorageError::NotFound => AppError::not_found("not found"),
            StorageError::Internal { .. } => AppError::internal(e.to_string()),
        }
    }
}
