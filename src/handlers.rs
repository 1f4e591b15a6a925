use std::any::Any;
use std::time::Instant;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::AppState;
use crate::client::call_chat;
use crate::error::ProxyError;
use crate::logger::log_request;
use crate::models::{AskResponse, ChatRequest, ErrorResponse, HealthResponse};

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {

    Json(HealthResponse {
        status: "healthy",
        api_key_configured: state.config.api_key_configured()
    })

}

// body is taken raw so malformed JSON and oversized bodies map to our own errors
pub async fn ask(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>
) -> Response {

    let started = Instant::now();

    let (response, outcome) = match answer_question(&state, body).await {
        Ok(answer) => {
            info!(chars = answer.chars().count(), "answered question");
            (Json(AskResponse::new(answer)).into_response(), "answered")
        }
        Err(err) => {
            let outcome = err.kind();
            warn!(kind = outcome, "ask failed: {}", err);
            (err.into_response(), outcome)
        }
    };

    if let Some(path) = &state.config.request_log {
        log_request(
            path,
            outcome,
            response.status().as_u16(),
            &state.config.chat.model,
            started.elapsed().as_millis()
        );
    }

    response

}

async fn answer_question(
    state: &AppState,
    body: Result<Bytes, BytesRejection>
) -> Result<String, ProxyError> {

    let body = body?;
    let question = extract_question(&body, state.config.max_question_chars)?;

    let api_key = state.config.api_key
        .as_deref()
        .ok_or(ProxyError::MissingApiKey)?;

    let request = ChatRequest::for_question(&question, &state.config.chat);

    call_chat(&state.http_client, &state.config.chat, api_key, &request).await

}

/// Pulls the trimmed `question` out of a raw request body.
pub fn extract_question(body: &[u8], max_chars: usize) -> Result<String, ProxyError> {

    let parsed: Value = serde_json::from_slice(body)
        .map_err(|_| ProxyError::Validation("Question is required"))?;

    let raw = parsed
        .get("question")
        .ok_or(ProxyError::Validation("Question is required"))?;

    let question = raw
        .as_str()
        .ok_or(ProxyError::Validation("Question must be a string"))?
        .trim();

    if question.is_empty() {
        return Err(ProxyError::Validation("Question cannot be empty"));
    }

    if question.chars().count() > max_chars {
        return Err(ProxyError::Validation("Question is too long"));
    }

    Ok(question.to_string())

}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
            status_code: None
        }),
    )
        .into_response()
}

pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
            status_code: None
        }),
    )
        .into_response()
}

pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {

    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    error!("handler panicked: {}", message);
    ProxyError::Internal(message).into_response()

}

#[cfg(test)]
mod tests {

    use super::*;

    fn validation_message(result: Result<String, ProxyError>) -> &'static str {
        match result {
            Err(ProxyError::Validation(message)) => message,
            other => panic!("expected validation error, got {:?}", other)
        }
    }

    #[test]
    fn test_question_is_trimmed() {

        let question = extract_question(br#"{"question": "  What is Rust?\n"}"#, 100).unwrap();
        assert_eq!(question, "What is Rust?");

    }

    #[test]
    fn test_missing_question_key() {

        assert_eq!(validation_message(extract_question(br#"{"prompt": "hi"}"#, 100)), "Question is required");

    }

    #[test]
    fn test_unparseable_body() {

        assert_eq!(validation_message(extract_question(b"question=hi", 100)), "Question is required");
        assert_eq!(validation_message(extract_question(b"", 100)), "Question is required");
        assert_eq!(validation_message(extract_question(b"[1, 2]", 100)), "Question is required");

    }

    #[test]
    fn test_whitespace_question_is_empty() {

        assert_eq!(validation_message(extract_question(br#"{"question": " \t\n "}"#, 100)), "Question cannot be empty");

    }

    #[test]
    fn test_non_string_question() {

        assert_eq!(validation_message(extract_question(br#"{"question": 42}"#, 100)), "Question must be a string");
        assert_eq!(validation_message(extract_question(br#"{"question": null}"#, 100)), "Question must be a string");

    }

    #[test]
    fn test_length_cap_counts_characters() {

        // five chars, more than five bytes
        assert!(extract_question(r#"{"question": "héllo"}"#.as_bytes(), 5).is_ok());
        assert_eq!(validation_message(extract_question(br#"{"question": "hello!"}"#, 5)), "Question is too long");

    }

    #[test]
    fn test_panic_response_is_internal_error() {

        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    }

}
