//! Provider Abstractions
//!
//! Defines the interfaces for the two remote services the agent talks to:
//! a chat completion backend and an optional moderation backend. The agent
//! works exclusively through these traits, which keeps the hosted Grok
//! integration swappable for stubs in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::message::Message;
use crate::persona;

/// Configuration for LLM generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "grok-3")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: persona::MODEL.into(),
            temperature: persona::TEMPERATURE,
            max_tokens: persona::MAX_TOKENS,
        }
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text; empty when the provider returned no content
    pub content: String,

    /// Model that generated this response
    pub model: String,
}

/// Strategy trait for chat completion providers
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion from an ordered message history
    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion>;
}

/// Per-category moderation flags.
///
/// The two categories that gate the persona are modeled explicitly; every
/// other category reported by the moderation API is carried in `extra` so
/// the verdict is complete for logging.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ModerationCategories {
    #[serde(default)]
    pub sexual: bool,

    #[serde(default, rename = "sexual/minors")]
    pub sexual_minors: bool,

    #[serde(flatten)]
    pub extra: HashMap<String, bool>,
}

/// Result of screening a piece of text
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ModerationVerdict {
    /// Whether any category flagged
    pub flagged: bool,

    /// Per-category breakdown
    pub categories: ModerationCategories,
}

impl ModerationVerdict {
    /// Whether this verdict blocks the chat reply outright.
    ///
    /// Only sexual content (including sexual content involving minors)
    /// short-circuits the persona; other flagged categories are forwarded
    /// to the provider unchanged.
    pub fn blocks_chat(&self) -> bool {
        self.flagged && (self.categories.sexual || self.categories.sexual_minors)
    }
}

/// Strategy trait for content moderation providers
#[async_trait]
pub trait ModerationProvider: Send + Sync {
    /// Screen a single piece of user text
    async fn moderate(&self, input: &str) -> Result<ModerationVerdict>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert_eq!(opts.model, "grok-3");
        assert_eq!(opts.temperature, 0.8);
        assert_eq!(opts.max_tokens, 1024);
    }

    #[test]
    fn test_verdict_blocks_only_sexual_categories() {
        let mut verdict = ModerationVerdict {
            flagged: true,
            categories: ModerationCategories {
                sexual: true,
                ..Default::default()
            },
        };
        assert!(verdict.blocks_chat());

        verdict.categories.sexual = false;
        verdict.categories.sexual_minors = true;
        assert!(verdict.blocks_chat());

        // Flagged for something else entirely, e.g. harassment
        verdict.categories.sexual_minors = false;
        verdict
            .categories
            .extra
            .insert("harassment".into(), true);
        assert!(!verdict.blocks_chat());

        // Not flagged at all
        let clean = ModerationVerdict::default();
        assert!(!clean.blocks_chat());
    }

    #[test]
    fn test_categories_deserialize_openai_shape() {
        let json = r#"{"sexual":true,"sexual/minors":false,"violence":true}"#;
        let cats: ModerationCategories = serde_json::from_str(json).unwrap();
        assert!(cats.sexual);
        assert!(!cats.sexual_minors);
        assert_eq!(cats.extra.get("violence"), Some(&true));
    }
}
