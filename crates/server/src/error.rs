//! HTTP error responses
//!
//! Every failure reaches the browser as `{"error": message}` with a 4xx or
//! 500 status.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Error body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Failure from the core library or the object store
    #[error(transparent)]
    Core(#[from] sb_core::Error),

    /// Malformed request the handler detected itself
    #[error("{0}")]
    BadRequest(String),

    /// Query string that could not be decoded
    #[error("Invalid query string: {0}")]
    Query(#[from] QueryRejection),

    /// Request that is not a usable multipart form
    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartRejection),

    /// Multipart body that failed part way through
    #[error("Invalid upload: {0}")]
    MultipartBody(#[from] MultipartError),
}

impl ApiError {
    /// Message sent to the browser
    ///
    /// An oversized upload reports the body limit instead of the generic
    /// multipart parse failure.
    pub fn message(&self) -> String {
        match self {
            ApiError::MultipartBody(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                format!("Invalid upload: {}", e.body_text())
            }
            _ => self.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::MultipartBody(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ApiError::BadRequest(_)
            | ApiError::Query(_)
            | ApiError::Multipart(_)
            | ApiError::MultipartBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        let store = matches!(&self, ApiError::Core(e) if e.is_store_error());

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), store, "{message}");
        } else {
            tracing::warn!(status = status.as_u16(), "{message}");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
