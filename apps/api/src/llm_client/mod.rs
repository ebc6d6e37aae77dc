/// LLM Client — the single point of entry for all Groq API calls.
///
/// ARCHITECTURAL RULE: No other module may call the completion backend
/// directly. All LLM interactions MUST go through this module.
///
/// One synchronous request per call: no streaming, no internal retry. A
/// failed call surfaces as `LlmError` and retrying is the caller's decision.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default model for analysis calls: a general-purpose small
/// instruction-tuned identifier. Callers may override per request.
pub const DEFAULT_MODEL: &str = "gemma2-9b-it";
/// Default output-token ceiling for generic analysis calls.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("GROQ API key is empty")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned no completion choices")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for the Groq OpenAI-compatible chat-completions endpoint.
/// Holds only immutable configuration; safe to share across callers.
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    /// Builds a client, failing fast on a missing credential before any
    /// network call is ever attempted.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Sends one single-turn completion request: `prompt` and `text` joined
    /// with a blank line as the sole user message. Returns the first choice's
    /// content with surrounding whitespace stripped.
    pub async fn complete(
        &self,
        prompt: &str,
        text: &str,
        model: &str,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let content = format!("{prompt}\n\n{text}");
        let request_body = ChatRequest {
            model,
            max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: &content,
            }],
        };

        let response = self
            .client
            .post(format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the structured error message
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;
        let choice = chat_response.choices.first().ok_or(LlmError::EmptyResponse)?;

        debug!(
            "LLM call succeeded: model={}, response_chars={}",
            model,
            choice.message.content.len()
        );

        Ok(choice.message.content.trim().to_string())
    }
}
