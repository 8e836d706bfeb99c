use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ErrorResponse;

/// The first rule a create payload failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' is required")]
    MissingField(&'static str),
    #[error("'{field}' is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error")]
    Database(#[from] libsql::Error),
    #[error("insert into {0} returned no row")]
    MissingRow(&'static str),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("Bookmark Not Found")]
    NotFound,
    #[error("storage failure")]
    Storage(#[from] StorageError),
}

pub const NOT_FOUND_MESSAGE: &str = "Bookmark Not Found";
pub const SERVER_ERROR_MESSAGE: &str = "server error";
pub const INVALID_BODY_MESSAGE: &str = "Invalid data";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(reason) => (StatusCode::BAD_REQUEST, reason.to_string()),
            ApiError::MalformedBody(_) => (StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            ApiError::Storage(e) => {
                tracing::error!(error = %crate::unpack_error(e), "storage operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE.to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
