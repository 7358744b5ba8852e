//! Grok LLM Provider
//!
//! Implementation of `CompletionProvider` against xAI's OpenAI-compatible
//! chat completions API. Non-streaming; one request per chat turn, with the
//! HTTP client's default timeout and no retry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use persona_core::{
    error::{ChatError, Result},
    message::{Message, Role},
    provider::{Completion, CompletionProvider, GenerationOptions},
};

const DEFAULT_BASE_URL: &str = "https://api.x.ai/v1";

/// Grok chat completion provider
pub struct GrokProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GrokProvider {
    /// Create a new provider for the hosted xAI endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    /// Override the API base URL (used by tests against a local stub)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a Message> for ApiMessage<'a> {
    fn from(m: &'a Message) -> Self {
        let role = match m.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role,
            content: &m.content,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl CompletionProvider for GrokProvider {
    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = CompletionRequest {
            model: &options.model,
            messages: messages.iter().map(ApiMessage::from).collect(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Grok API error: {}", body);
            return Err(match status.as_u16() {
                401 | 403 => ChatError::Auth(body),
                429 => ChatError::RateLimited(body),
                _ => ChatError::Provider(format!("status {status}: {body}")),
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Provider(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(Completion {
            content,
            model: options.model.clone(),
        })
    }
}
