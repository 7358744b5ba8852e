//! Application State

use std::sync::Arc;

use persona_core::{CompletionProvider, ModerationProvider};
use persona_payments::{SessionTokenCodec, StripeCheckout};

/// Shared application state; read-only after startup
#[derive(Clone)]
pub struct AppState {
    /// Chat completion provider (None if XAI_API_KEY unset)
    pub completion: Option<Arc<dyn CompletionProvider>>,

    /// Moderation provider (None if OPENAI_API_KEY unset - moderation skipped)
    pub moderation: Option<Arc<dyn ModerationProvider>>,

    /// Stripe client (None if STRIPE_SECRET_KEY unset - payments disabled)
    pub stripe: Option<Arc<StripeCheckout>>,

    /// Session token codec
    pub sessions: Arc<SessionTokenCodec>,

    /// Public base URL for redirects
    pub base_url: String,

    /// Marks cookies `Secure` when true
    pub production: bool,
}
