//! OpenAI Moderation Provider
//!
//! Implementation of `ModerationProvider` against OpenAI's `/moderations`
//! endpoint. Callers treat failures here as non-fatal; this client only
//! reports them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use persona_core::{
    error::{ChatError, Result},
    provider::{ModerationCategories, ModerationProvider, ModerationVerdict},
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI moderation client
pub struct OpenAiModeration {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiModeration {
    /// Create a new client for the hosted OpenAI endpoint
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
struct ModerationRequest<'a> {
    input: &'a str,
}

#[derive(Deserialize)]
struct ModerationResponse {
    #[serde(default)]
    results: Vec<ModerationResult>,
}

#[derive(Deserialize)]
struct ModerationResult {
    flagged: bool,
    categories: ModerationCategories,
}

#[async_trait]
impl ModerationProvider for OpenAiModeration {
    async fn moderate(&self, input: &str) -> Result<ModerationVerdict> {
        let response = self
            .client
            .post(format!("{}/moderations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&ModerationRequest { input })
            .send()
            .await
            .map_err(|e| ChatError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Provider(format!("status {status}: {body}")));
        }

        let parsed: ModerationResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Provider(e.to_string()))?;

        let result = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::Provider("empty moderation results".into()))?;

        Ok(ModerationVerdict {
            flagged: result.flagged,
            categories: result.categories,
        })
    }
}
