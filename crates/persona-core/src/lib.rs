//! # persona-core
//!
//! Core chat logic for persona-chat: message types, provider-agnostic
//! completion and moderation abstractions, and the persona agent that
//! orchestrates them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      PersonaAgent                            │
//! │  ┌───────────────────┐        ┌──────────────────────────┐   │
//! │  │ ModerationProvider│───────▶│  CompletionProvider      │   │
//! │  │   (optional gate) │        │  (Grok, stubs, ...)      │   │
//! │  └───────────────────┘        └──────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `CompletionProvider` trait enables swapping between the hosted Grok
//! backend and test stubs without changing agent logic. Moderation is an
//! optional pre-step; when its provider fails, the agent degrades to
//! "no moderation" rather than blocking the reply.

pub mod agent;
pub mod error;
pub mod message;
pub mod persona;
pub mod provider;

pub use agent::PersonaAgent;
pub use error::{ChatError, Result};
pub use message::{Message, Role};
pub use provider::{CompletionProvider, ModerationProvider};
