/// LLM Client — the single point of entry for completion calls in the grader.
///
/// Handlers and services depend on the `CompletionProvider` trait, never on
/// `GroqClient` directly, so tests can swap in canned completions.
///
/// One attempt per call. No retries.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LlmConfig;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Anything that can turn a prompt into completion text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts `choices[0].message.content`.
    pub fn into_text(self) -> Result<String, LlmError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::MalformedResponse("response has no choices".to_string()))?;
        let message = choice.message.ok_or_else(|| {
            LlmError::MalformedResponse("first choice has no message".to_string())
        })?;
        message
            .content
            .ok_or_else(|| LlmError::MalformedResponse("message has no content".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Decodes a 2xx response body into completion text.
fn completion_from_body(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::MalformedResponse(format!("invalid JSON: {e}")))?;

    if let Some(usage) = &response.usage {
        debug!(
            "Completion succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    response.into_text()
}

/// Groq chat-completions client (OpenAI-compatible wire format).
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    config: LlmConfig,
}

impl GroqClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl CompletionProvider for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: crate::grading::prompts::GRADER_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Try to parse error message
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Completion API returned {}: {}", status, message);
            return Err(LlmError::Status {
                status: status.as_u16(),
                message,
            });
        }

        completion_from_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_from_well_formed_body() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Clarity: 8/10\nNice."}}
            ],
            "usage": {"prompt_tokens": 120, "completion_tokens": 9, "total_tokens": 129}
        }"#;
        assert_eq!(completion_from_body(body).unwrap(), "Clarity: 8/10\nNice.");
    }

    #[test]
    fn test_completion_without_usage_is_fine() {
        let body = r#"{"choices": [{"message": {"content": "ok"}}]}"#;
        assert_eq!(completion_from_body(body).unwrap(), "ok");
    }

    #[test]
    fn test_missing_choices_is_malformed() {
        let err = completion_from_body(r#"{"id": "x"}"#).unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));

        let err = completion_from_body(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_message_or_content_is_malformed() {
        let err = completion_from_body(r#"{"choices": [{"index": 0}]}"#).unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));

        let err =
            completion_from_body(r#"{"choices": [{"message": {"role": "assistant"}}]}"#).unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let err = completion_from_body("<html>gateway</html>").unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = GroqClient::new(LlmConfig {
            api_key: "test-key".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.2,
            max_tokens: 256,
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(client.model(), "llama-3.1-8b-instant");
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "m",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.5,
            max_tokens: 64,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 64);
        assert_eq!(json["temperature"], 0.5);
    }
}
