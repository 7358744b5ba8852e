//! persona-chat HTTP Server
//!
//! Axum-based server behind the paywalled persona chat: Stripe Checkout for
//! the $5 session, a signed-cookie gate, and the chat proxy to the hosted
//! Grok backend.

mod config;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use persona_core::{CompletionProvider, ModerationProvider};
use persona_payments::{SessionTokenCodec, StripeCheckout};
use persona_runtime::{GrokProvider, OpenAiModeration};

use crate::config::AppConfig;
use crate::handlers::{
    chat_handler, create_checkout, health_check, payment_success, verify_session,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    // Chat completion provider
    let completion: Option<Arc<dyn CompletionProvider>> = config
        .xai_api_key
        .as_deref()
        .map(|key| Arc::new(GrokProvider::new(key)) as Arc<dyn CompletionProvider>);

    if completion.is_some() {
        tracing::info!("✓ Grok configured");
    } else {
        tracing::warn!("⚠ XAI_API_KEY not set - chat disabled");
    }

    // Optional moderation
    let moderation: Option<Arc<dyn ModerationProvider>> = config
        .moderation_api_key
        .as_deref()
        .map(|key| Arc::new(OpenAiModeration::new(key)) as Arc<dyn ModerationProvider>);

    if moderation.is_some() {
        tracing::info!("✓ Moderation configured");
    } else {
        tracing::warn!("⚠ OPENAI_API_KEY not set - moderation skipped");
    }

    // Payments
    let stripe = config
        .stripe_secret_key
        .as_deref()
        .map(|key| Arc::new(StripeCheckout::new(key)));

    if stripe.is_some() {
        tracing::info!("✓ Stripe configured");
    } else {
        tracing::warn!("⚠ STRIPE_SECRET_KEY not set - payments disabled");
    }

    // Session tokens
    let sessions = Arc::new(SessionTokenCodec::new(&config.session_secret));

    // Build application state
    let state = AppState {
        completion,
        moderation,
        stripe,
        sessions,
        base_url: config.base_url.clone(),
        production: config.production,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health & info
        .route("/health", get(health_check))
        // Chat API
        .route("/api/chat", post(chat_handler))
        // Payments & session gate
        .route("/api/create-checkout", post(create_checkout))
        .route("/api/payment-success", get(payment_success))
        .route("/api/verify-session", get(verify_session))
        // Static files (landing + chat UI)
        .fallback_service(tower_http::services::ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("persona-chat server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health               - Health check");
    tracing::info!("  POST /api/chat             - Send conversation, get persona reply");
    tracing::info!("  POST /api/create-checkout  - Create Stripe checkout session");
    tracing::info!("  GET  /api/payment-success  - Checkout return, sets session cookie");
    tracing::info!("  GET  /api/verify-session   - Validate session cookie");

    axum::serve(listener, app).await?;

    Ok(())
}
