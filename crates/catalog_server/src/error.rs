//! HTTP-facing error taxonomy.
//!
//! # Responsibility
//! - Map repository and request-decoding failures onto status codes.
//! - Keep storage details in logs, out of response bodies.
//!
//! # Invariants
//! - Missing products map to 404, bad input to 400, a non-JSON content type
//!   to 415, everything else to 500.
//! - Response bodies are short plain text; there is no JSON error envelope.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_core::RepoError;
use log::{error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const INTERNAL_ERROR_BODY: &str = "internal server error";

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadInput(String),
    UnsupportedMediaType(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadInput(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message)
            | Self::BadInput(message)
            | Self::UnsupportedMediaType(message)
            | Self::Internal(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ApiError {}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(_) => Self::NotFound(value.to_string()),
            RepoError::Validation(err) => Self::BadInput(err.to_string()),
            RepoError::Db(_) => Self::Internal(value.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        match value {
            JsonRejection::MissingJsonContentType(_) => {
                Self::UnsupportedMediaType(value.body_text())
            }
            _ => Self::BadInput(value.body_text()),
        }
    }
}

/// A path segment that is not an integer id never names a product.
impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::NotFound(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(message) => {
                error!(
                    "event=http_error module=http status={} error={}",
                    status.as_u16(),
                    message
                );
                (status, INTERNAL_ERROR_BODY).into_response()
            }
            Self::NotFound(message)
            | Self::BadInput(message)
            | Self::UnsupportedMediaType(message) => {
                warn!(
                    "event=http_error module=http status={} error={}",
                    status.as_u16(),
                    message
                );
                (status, message.clone()).into_response()
            }
        }
    }
}
