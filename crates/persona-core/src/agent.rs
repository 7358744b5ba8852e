//! Persona Agent
//!
//! Orchestrates a single chat turn: optionally screens the latest user turn
//! through moderation, prepends the fixed persona prompt, and forwards the
//! full ordered history to the completion provider. Stateless — the caller
//! resupplies the history on every request and no retry is performed for
//! any failure.

use std::sync::Arc;

use crate::error::Result;
use crate::message::{latest_user_content, Message};
use crate::persona;
use crate::provider::{CompletionProvider, GenerationOptions, ModerationProvider};

/// The persona chat agent
pub struct PersonaAgent {
    provider: Arc<dyn CompletionProvider>,
    moderation: Option<Arc<dyn ModerationProvider>>,
    options: GenerationOptions,
}

impl PersonaAgent {
    /// Create a new agent with the persona's fixed generation options
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        moderation: Option<Arc<dyn ModerationProvider>>,
    ) -> Self {
        Self {
            provider,
            moderation,
            options: GenerationOptions::default(),
        }
    }

    /// Override generation options (used by tests)
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Produce the persona's reply to an ordered conversation history.
    ///
    /// Moderation failures are logged and swallowed — a flaky moderation
    /// provider degrades to "no moderation" and must never block the reply.
    /// A verdict flagged for sexual content short-circuits with the fixed
    /// rejection line instead of calling the completion provider.
    pub async fn reply(&self, history: &[Message]) -> Result<String> {
        if let Some(moderation) = &self.moderation {
            if let Some(latest) = latest_user_content(history) {
                match moderation.moderate(latest).await {
                    Ok(verdict) if verdict.blocks_chat() => {
                        tracing::info!("Message blocked by moderation");
                        return Ok(persona::MODERATION_REJECTION.into());
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("Moderation check failed, continuing: {}", e);
                    }
                }
            }
        }

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(Message::system(persona::SYSTEM_PROMPT));
        messages.extend_from_slice(history);

        let completion = self.provider.complete(&messages, &self.options).await?;

        if completion.content.is_empty() {
            return Ok(persona::FALLBACK_REPLY.into());
        }

        Ok(completion.content)
    }
}
