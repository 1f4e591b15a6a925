use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::config::ChatSettings;
use crate::error::ProxyError;
use crate::models::{ChatRequest, ChatResponse};

/// Sends one chat-completion request and returns the first choice's text.
/// The timeout covers the whole exchange, body included.
pub async fn call_chat(
    client: &Client,
    settings: &ChatSettings,
    api_key: &str,
    request: &ChatRequest
) -> Result<String, ProxyError> {

    let response = client
        .post(&settings.api_url)
        .timeout(settings.timeout)
        .header("Authorization", format!("Bearer {}", api_key))
        .header(CONTENT_TYPE, "application/json")
        .json(request)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ProxyError::Upstream {
            status: status.as_u16(),
            body
        });
    }

    extract_answer(&body)

}

pub fn extract_answer(body: &str) -> Result<String, ProxyError> {

    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|_| ProxyError::UnexpectedFormat)?;

    parsed.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(ProxyError::UnexpectedFormat)

}
