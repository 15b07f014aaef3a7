//! OpenAI-compatible chat completion models
//!
//! Request and response structures for the `/chat/completions` endpoint, as
//! served by Groq and other OpenAI-compatible providers.

use crate::core::constants::role;
use serde::{Deserialize, Serialize};

/// OpenAI message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl OpenAIMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: role::SYSTEM.to_string(),
            content: Some(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: role::USER.to_string(),
            content: Some(content.into()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: role::ASSISTANT.to_string(),
            content: Some(content.into()),
        }
    }
}

/// OpenAI chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIChatCompletionRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub stream: bool,
}

/// OpenAI chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIChatCompletionResponse {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    pub model: String,
    pub choices: Vec<OpenAIChoice>,
    #[serde(default)]
    pub usage: Option<OpenAIUsage>,
}

impl OpenAIChatCompletionResponse {
    /// Text of the first choice, if the model returned any
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

/// OpenAI choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIChoice {
    pub index: u32,
    pub message: OpenAIMessage,
    pub finish_reason: Option<String>,
}

/// OpenAI usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAIUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl std::ops::AddAssign for OpenAIUsage {
    fn add_assign(&mut self, other: Self) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(other.prompt_tokens);
        self.completion_tokens = self.completion_tokens.saturating_add(other.completion_tokens);
        self.total_tokens = self.total_tokens.saturating_add(other.total_tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_sum_saturates() {
        let mut total = OpenAIUsage {
            prompt_tokens: 10,
            completion_tokens: u32::MAX - 1,
            total_tokens: u32::MAX,
        };
        total += OpenAIUsage {
            prompt_tokens: 5,
            completion_tokens: 7,
            total_tokens: 12,
        };
        assert_eq!(total.prompt_tokens, 15);
        assert_eq!(total.completion_tokens, u32::MAX);
        assert_eq!(total.total_tokens, u32::MAX);
    }

    #[test]
    fn test_request_omits_unset_fields() {
        let request = OpenAIChatCompletionRequest {
            model: "llama-3.1-8b-instant".to_string(),
            messages: vec![OpenAIMessage::system("be brief"), OpenAIMessage::user("hi")],
            max_tokens: None,
            temperature: Some(0.5),
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["temperature"], 0.5);
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_parse_groq_response() {
        let body = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1730000000,
            "model": "llama-3.1-8b-instant",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Three themes emerge."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 40, "completion_tokens": 4, "total_tokens": 44},
            "x_groq": {"id": "req_01"}
        }"#;
        let response: OpenAIChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_text(), Some("Three themes emerge."));
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(44));
    }

    #[test]
    fn test_blank_content_is_not_text() {
        let response = OpenAIChatCompletionResponse {
            id: "chatcmpl-1".to_string(),
            object: String::new(),
            created: 0,
            model: "m".to_string(),
            choices: vec![OpenAIChoice {
                index: 0,
                message: OpenAIMessage::assistant("  \n"),
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        };
        assert_eq!(response.first_text(), None);
    }
}
