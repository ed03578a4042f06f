use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cms_core::error::DomainError;
use cms_template::{RegistryError, RenderFailure};
use thiserror::Error;

use crate::envelope::Envelope;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::CommentNotFound(id) => ApiError::NotFound(format!("comment {id}")),
            DomainError::InvalidSort(sort) => ApiError::BadRequest(format!("invalid sort: {sort}")),
            DomainError::Timeout(op) => ApiError::Unavailable(format!("{op} timed out")),
            DomainError::DatabaseError(msg) => ApiError::DatabaseError(msg),
            DomainError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<RenderFailure> for ApiError {
    fn from(e: RenderFailure) -> Self {
        match e {
            RenderFailure::TemplateNotFound(name) => ApiError::NotFound(format!("page {name}")),
            RenderFailure::Timeout(_) => ApiError::Unavailable(e.to_string()),
            RenderFailure::Render(_) | RenderFailure::Join(_) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "Not Found".to_string())
            },
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            },
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            },
            ApiError::Unavailable(msg) => {
                tracing::error!("Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, msg)
            },
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            },
        };

        Envelope::failure(status, message).into_response()
    }
}

/// Failures while assembling the application state.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Helper registration failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("Template loading failed: {0}")]
    Template(String),

    #[error("No async runtime: {0}")]
    Runtime(String),
}
