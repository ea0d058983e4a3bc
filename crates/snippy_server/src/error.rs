//! HTTP error mapping for API handlers.

use crate::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use snippy_core::models::paste::ErrorResponse;

/// Wrapper that renders an [`AppError`] as a JSON error response.
#[derive(Debug)]
pub struct HttpError(pub AppError);

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl HttpError {
    /// Status code and client-facing message for the wrapped error.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self.0 {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            AppError::Expired => (StatusCode::GONE, "Expired"),
            AppError::Conflict { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Collision occurred, try again.",
            ),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        match &self.0 {
            AppError::Conflict { attempts } => {
                tracing::warn!("Short code allocation gave up after {} attempts", attempts);
            }
            AppError::Storage(err) => {
                tracing::error!("Storage error: {}", err);
            }
            AppError::NotFound | AppError::Expired => {}
        }

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}
