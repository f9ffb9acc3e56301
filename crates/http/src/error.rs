//! `RequestError` (spec §7): the HTTP-layer error kind, with its status-code mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised while handling a request, independent of any specific route.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    #[error("service unavailable, still initializing")]
    ServiceUnavailable,

    #[error("no content")]
    NoContent,

    #[error("unmatched route")]
    Unknown,
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = match &self {
            RequestError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RequestError::NotFound => StatusCode::NOT_FOUND,
            RequestError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            RequestError::NoContent => StatusCode::NO_CONTENT,
            RequestError::Unknown => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}
