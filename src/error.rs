use std::error::Error as StdError;

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Request body too large")]
    BodyTooLarge,

    #[error("API key not configured")]
    MissingApiKey,

    #[error("Chat API error: {body}")]
    Upstream { status: u16, body: String },

    #[error("Request to chat API timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response format from chat API")]
    UnexpectedFormat,

    #[error("Internal server error: {0}")]
    Internal(String)
}

impl ProxyError {

    pub fn status_code(&self) -> StatusCode {

        match self {
            ProxyError::Validation(_) => StatusCode::BAD_REQUEST,
            ProxyError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            // relay the upstream status as-is
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::MissingApiKey
            | ProxyError::Network(_)
            | ProxyError::UnexpectedFormat
            | ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR
        }

    }

    /// Short label used in logs and the request log file.
    pub fn kind(&self) -> &'static str {

        match self {
            ProxyError::Validation(_) | ProxyError::BodyTooLarge => "validation",
            ProxyError::MissingApiKey => "configuration",
            ProxyError::Upstream { .. } => "upstream",
            ProxyError::Timeout => "timeout",
            ProxyError::Network(_) => "network",
            ProxyError::UnexpectedFormat => "upstream_shape",
            ProxyError::Internal(_) => "internal"
        }

    }

}

/// Joins an error with all of its sources, outermost first.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {

    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        // some wrappers already repeat their cause in their own message
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    message

}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::Timeout
        } else if err.is_builder() {
            ProxyError::Internal(error_chain(&err))
        } else {
            ProxyError::Network(error_chain(&err))
        }
    }
}

impl From<BytesRejection> for ProxyError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ProxyError::BodyTooLarge
        } else {
            ProxyError::Validation("Question is required")
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {

        let status = self.status_code();
        let status_code = match &self {
            ProxyError::Upstream { status, .. } => Some(*status),
            _ => None
        };

        let body = ErrorResponse {
            error: self.to_string(),
            status_code
        };

        (status, Json(body)).into_response()

    }
}
