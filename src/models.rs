use serde::{Deserialize, Serialize};

use crate::config::ChatSettings;

#[derive(Debug, Deserialize, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32
}

impl ChatRequest {

    // a single user turn, no history is carried between asks
    pub fn for_question(question: &str, settings: &ChatSettings) -> Self {

        ChatRequest {
            model: settings.model.clone(),
            messages: vec![
                Message {
                    role: "user".to_string(),
                    content: question.to_string()
                }
            ],
            temperature: settings.temperature,
            max_tokens: settings.max_tokens
        }

    }

}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Message
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub success: bool
}

impl AskResponse {
    pub fn new(answer: String) -> Self {
        AskResponse { answer, success: true }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub api_key_configured: bool
}
