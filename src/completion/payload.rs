//! Request body sent to the chat-completions endpoint.
use serde::{Deserialize, Serialize};

pub const MODEL: &str = "sonar";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage { role: "user".to_string(), content: content.into() }
    }
}

/// Fixed-shape completion request: one system message, one user message and
/// constant sampling parameters. Only `max_tokens` varies by variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletionPayload {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub stream: bool,
    pub presence_penalty: i32,
    pub frequency_penalty: i32,
}

impl CompletionPayload {
    pub fn new(system_instruction: &str, prompt: &str, max_tokens: u32) -> Self {
        CompletionPayload {
            model: MODEL.to_string(),
            messages: vec![ChatMessage::system(system_instruction), ChatMessage::user(prompt)],
            max_tokens,
            temperature: 0.2,
            top_p: 0.9,
            stream: false,
            presence_penalty: 0,
            frequency_penalty: 1,
        }
    }
}
