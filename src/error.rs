use crate::domain::phone_number::PhoneError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Not found")]
    NotFound,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    InvalidPhone(#[from] PhoneError),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal server error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Stable machine-readable code sent alongside the message.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::InvalidPhone(_) => "invalid_phone",
            Self::Conflict(_) => "conflict",
            Self::Internal => "internal",
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::InvalidPhone(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match self {
            Self::NotFound => {
                tracing::debug!("Resource not found");
                "Not found".to_string()
            }
            Self::BadRequest(msg) => {
                tracing::debug!(message = %msg, "Bad request");
                msg
            }
            Self::InvalidPhone(err) => {
                tracing::debug!(error = %err, "Rejected phone number");
                err.to_string()
            }
            Self::Conflict(msg) => {
                tracing::debug!(message = %msg, "Conflict");
                msg
            }
            Self::Internal => {
                tracing::error!("Internal server error occurred");
                "Internal server error".to_string()
            }
        };

        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}
