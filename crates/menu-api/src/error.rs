use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use menu_core::error::{DomainError, StorageFault};
use menu_shared::constants::{
    MSG_CREATE_FAILED, MSG_DELETE_FAILED, MSG_INVALID_BODY, MSG_INVALID_ID, MSG_IN_USE,
    MSG_IN_USE_SUGGESTION, MSG_NOT_FOUND, MSG_UPDATE_FAILED,
};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        error: Option<String>,
        suggestion: Option<String>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        error: Option<String>,
        details: Option<StorageFault>,
    },
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<StorageFault>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            error: None,
            suggestion: None,
        }
    }

    pub fn invalid_id() -> Self {
        Self::bad_request(MSG_INVALID_ID)
    }

    fn internal(message: &str) -> Self {
        ApiError::Internal {
            message: message.to_string(),
            error: None,
            details: None,
        }
    }

    /// Maps a domain error; `context` becomes the message of storage faults.
    pub fn from_domain(err: DomainError, context: &str) -> Self {
        match err {
            DomainError::ValidationError(msg) => Self::bad_request(msg),
            DomainError::MenuItemNotFound => ApiError::NotFound(MSG_NOT_FOUND.to_string()),
            DomainError::MenuItemInUse => ApiError::BadRequest {
                message: MSG_IN_USE.to_string(),
                error: None,
                suggestion: Some(MSG_IN_USE_SUGGESTION.to_string()),
            },
            DomainError::CreateFailed => Self::internal(MSG_CREATE_FAILED),
            DomainError::UpdateFailed => Self::internal(MSG_UPDATE_FAILED),
            DomainError::DeleteFailed => Self::internal(MSG_DELETE_FAILED),
            DomainError::DatabaseError(fault) => ApiError::Internal {
                message: context.to_string(),
                error: Some(fault.message.clone()),
                details: Some(fault),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: MSG_INVALID_BODY.to_string(),
            error: Some(rejection.body_text()),
            suggestion: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest { message, error, suggestion } => {
                tracing::warn!("Bad request: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse { message, error, suggestion, details: None },
                )
            }
            ApiError::NotFound(message) => {
                tracing::warn!("Not found: {}", message);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse { message, error: None, suggestion: None, details: None },
                )
            }
            ApiError::Internal { message, error, details } => {
                tracing::error!("Internal error: {} ({:?})", message, error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse { message, error, suggestion: None, details },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
