use super::dto::{
    ApiResponse, GENERIC_ERROR_MESSAGE, INVALID_UPLOAD_MESSAGE, LISTING_ERROR_MESSAGE,
    PAYLOAD_TOO_LARGE_MESSAGE, STORAGE_ERROR_MESSAGE,
};
use crate::application::use_cases::UploadError;
use crate::debug::log_error_details;
use crate::domain::image::{ImageError, RepositoryError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;

/// Failure returned by a handler, rendered as `{success: false, message}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_upload() -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_UPLOAD_MESSAGE)
    }

    pub fn payload_too_large() -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE_MESSAGE)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ImageError> for ApiError {
    fn from(error: ImageError) -> Self {
        tracing::debug!("Rejected upload: {}", error);
        Self::invalid_upload()
    }
}

impl From<UploadError> for ApiError {
    fn from(error: UploadError) -> Self {
        match error {
            UploadError::Invalid(e) => e.into(),
            UploadError::Storage(e) => {
                log_error_details(&e, "upload");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, STORAGE_ERROR_MESSAGE)
            }
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        log_error_details(&error, "listing");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, LISTING_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error {}: {}", self.status, self.message),
            500..=599 => tracing::error!("Server error {}: {}", self.status, self.message),
            _ => {}
        }

        (self.status, Json(ApiResponse::failure(self.message))).into_response()
    }
}

/// Catch-all for handler panics
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);

    ApiError::internal().into_response()
}
