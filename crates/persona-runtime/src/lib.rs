//! # persona-runtime
//!
//! Remote provider implementations for persona-chat.
//!
//! ## Providers
//!
//! - **Grok**: chat completions via xAI's OpenAI-compatible API
//! - **OpenAI moderation**: content screening via `/moderations`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use persona_runtime::GrokProvider;
//!
//! let provider = GrokProvider::new("xai-...");
//! let agent = PersonaAgent::new(Arc::new(provider), None);
//! ```

pub mod grok;
pub mod moderation;

pub use grok::GrokProvider;
pub use moderation::OpenAiModeration;

// Re-export core types for convenience
pub use persona_core::{ChatError, CompletionProvider, Message, ModerationProvider, Result, Role};
