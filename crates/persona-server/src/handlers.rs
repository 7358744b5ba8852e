//! HTTP Handlers
//!
//! The four API routes plus a health check. Every upstream failure is caught
//! here and mapped to the error taxonomy; nothing is allowed to crash the
//! handling process. Checkout and session failures redirect silently to the
//! landing page rather than surfacing raw errors.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

use persona_core::{ChatError, Message, PersonaAgent};
use persona_payments::{PaidStatus, SESSION_COOKIE, SESSION_TTL_SECS};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub chat_configured: bool,
    pub moderation_configured: bool,
    pub stripe_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentSuccessParams {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifySessionResponse {
    pub valid: bool,
    #[serde(rename = "expiresAt")]
    pub expires_at: i64,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn map_chat_error(e: &ChatError) -> ApiError {
    let status = match e {
        ChatError::Validation(_) => StatusCode::BAD_REQUEST,
        ChatError::Auth(_) | ChatError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ChatError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, e.user_message())
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        chat_configured: state.completion.is_some(),
        moderation_configured: state.moderation.is_some(),
        stripe_configured: state.stripe.is_some(),
    })
}

/// Chat endpoint: forward a conversation history to the persona
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<ChatResponse>, ApiError> {
    let messages = payload
        .get("messages")
        .filter(|m| m.is_array())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Messages array is required"))?;

    let history: Vec<Message> = serde_json::from_value(messages.clone())
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Messages array is required"))?;

    let provider = state
        .completion
        .as_ref()
        .ok_or_else(|| api_error(StatusCode::INTERNAL_SERVER_ERROR, "API key not configured"))?;

    let agent = PersonaAgent::new(provider.clone(), state.moderation.clone());

    let message = agent.reply(&history).await.map_err(|e| {
        tracing::error!("Chat error: {}", e);
        map_chat_error(&e)
    })?;

    Ok(Json(ChatResponse { message }))
}

/// Create a Stripe checkout session for one $5 chat session
pub async fn create_checkout(
    State(state): State<AppState>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let stripe = state.stripe.as_ref().ok_or_else(|| {
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Stripe not configured")
    })?;

    let url = stripe
        .create_chat_checkout(&state.base_url)
        .await
        .map_err(|e| {
            tracing::error!("Checkout error: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.user_message())
        })?;

    Ok(Json(CheckoutResponse { url }))
}

/// Return from the hosted checkout page.
///
/// Confirms the paid status with Stripe, then mints the session token and
/// sets it as an HTTP-only cookie. This is the only writer of the session
/// cookie; every failure path redirects back to the landing page with the
/// jar untouched.
pub async fn payment_success(
    State(state): State<AppState>,
    Query(params): Query<PaymentSuccessParams>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let landing = Redirect::to(&format!("{}/", state.base_url));

    let Some(stripe) = state.stripe.as_ref() else {
        return (jar, landing);
    };
    let Some(session_id) = params.session_id else {
        return (jar, landing);
    };

    match stripe.payment_status(&session_id).await {
        Ok(PaidStatus::Paid) => grant_session(&state, jar, &session_id),
        Ok(PaidStatus::NotPaid) => {
            tracing::info!("Checkout session not paid, no session issued");
            (jar, landing)
        }
        Err(e) => {
            tracing::error!("Payment verification error: {}", e);
            (jar, landing)
        }
    }
}

/// Mint the session token for a paid checkout, attach it as the HTTP-only
/// session cookie, and redirect to the chat surface.
fn grant_session(state: &AppState, jar: CookieJar, session_id: &str) -> (CookieJar, Redirect) {
    let token = match state.sessions.issue(session_id) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to issue session token: {}", e);
            return (jar, Redirect::to(&format!("{}/", state.base_url)));
        }
    };

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(state.production)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS))
        .path("/")
        .build();

    let chat = Redirect::to(&format!("{}/chat", state.base_url));
    (jar.add(cookie), chat)
}

/// Report whether the caller holds a valid session cookie
pub async fn verify_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<VerifySessionResponse>, ApiError> {
    let token = jar
        .get(SESSION_COOKIE)
        .ok_or_else(|| api_error(StatusCode::UNAUTHORIZED, "No session found"))?;

    let claims = state.sessions.verify(token.value()).map_err(|e| {
        tracing::debug!("Session verification failed: {}", e);
        api_error(StatusCode::UNAUTHORIZED, "Session expired or invalid")
    })?;

    Ok(Json(VerifySessionResponse {
        valid: true,
        expires_at: claims.exp,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request},
        routing::{get, post},
        Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    use persona_core::provider::{Completion, CompletionProvider, GenerationOptions};
    use persona_core::Result as ChatResult;
    use persona_payments::SessionTokenCodec;

    struct StubProvider(&'static str);

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(
            &self,
            _messages: &[Message],
            options: &GenerationOptions,
        ) -> ChatResult<Completion> {
            Ok(Completion {
                content: self.0.into(),
                model: options.model.clone(),
            })
        }
    }

    fn test_state(completion: Option<Arc<dyn CompletionProvider>>) -> AppState {
        AppState {
            completion,
            moderation: None,
            stripe: None,
            sessions: Arc::new(SessionTokenCodec::new("test-secret")),
            base_url: "http://localhost:3000".into(),
            production: false,
        }
    }

    fn test_app(state: AppState) -> Router {
        Router::new()
            .route("/api/chat", post(chat_handler))
            .route("/api/create-checkout", post(create_checkout))
            .route("/api/payment-success", get(payment_success))
            .route("/api/verify-session", get(verify_session))
            .with_state(state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_chat_replies_with_provider_output() {
        let app = test_app(test_state(Some(Arc::new(StubProvider("hi there")))));

        let response = app
            .oneshot(json_post(
                "/api/chat",
                r#"{"messages":[{"role":"user","content":"hello"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"message": "hi there"})
        );
    }

    #[tokio::test]
    async fn test_chat_missing_messages_is_400() {
        let app = test_app(test_state(Some(Arc::new(StubProvider("unused")))));

        let response = app
            .oneshot(json_post("/api/chat", r#"{"text":"hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await.get("error").is_some());
    }

    #[tokio::test]
    async fn test_chat_non_array_messages_is_400() {
        let app = test_app(test_state(Some(Arc::new(StubProvider("unused")))));

        let response = app
            .oneshot(json_post("/api/chat", r#"{"messages":"hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_without_provider_is_500() {
        let app = test_app(test_state(None));

        let response = app
            .oneshot(json_post(
                "/api/chat",
                r#"{"messages":[{"role":"user","content":"hello"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "API key not configured"})
        );
    }

    #[tokio::test]
    async fn test_checkout_without_stripe_is_500() {
        let app = test_app(test_state(None));

        let response = app
            .oneshot(json_post("/api/create-checkout", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Stripe not configured"})
        );
    }

    #[tokio::test]
    async fn test_payment_success_without_session_id_redirects_home() {
        let app = test_app(test_state(None));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/payment-success")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "http://localhost:3000/"
        );
    }

    #[test]
    fn test_paid_checkout_grants_verifiable_cookie() {
        let state = test_state(None);
        let (jar, redirect) = grant_session(&state, CookieJar::new(), "cs_test_123");

        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert!(cookie.http_only().unwrap_or(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(SESSION_TTL_SECS))
        );
        // Not a production deployment, so no Secure attribute
        assert!(!cookie.secure().unwrap_or(false));

        // The cookie value is a token our own verifier accepts as paid
        let claims = state.sessions.verify(cookie.value()).unwrap();
        assert!(claims.paid);
        assert_eq!(claims.sub, "cs_test_123");
        assert_eq!(claims.exp, claims.iat + SESSION_TTL_SECS);

        use axum::response::IntoResponse;
        let response = redirect.into_response();
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "http://localhost:3000/chat"
        );
    }

    #[test]
    fn test_session_cookie_is_secure_in_production() {
        let mut state = test_state(None);
        state.production = true;

        let (jar, _) = grant_session(&state, CookieJar::new(), "cs_test_123");
        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(cookie.secure(), Some(true));
    }

    #[tokio::test]
    async fn test_verify_session_without_cookie_is_401() {
        let app = test_app(test_state(None));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/verify-session")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "No session found"})
        );
    }

    #[tokio::test]
    async fn test_verify_session_accepts_valid_cookie_repeatedly() {
        let state = test_state(None);
        let token = state.sessions.issue("cs_test_123").unwrap();
        let app = test_app(state);

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/api/verify-session")
                        .header(header::COOKIE, format!("{SESSION_COOKIE}={token}"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body["valid"], serde_json::json!(true));
            assert!(body["expiresAt"].is_i64());
        }
    }

    #[tokio::test]
    async fn test_verify_session_rejects_expired_cookie() {
        let state = test_state(None);
        let expired = state
            .sessions
            .issue_at("cs_test_123", 0) // epoch: long expired
            .unwrap();
        let app = test_app(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/verify-session")
                    .header(header::COOKIE, format!("{SESSION_COOKIE}={expired}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_verify_session_rejects_garbage_cookie() {
        let app = test_app(test_state(None));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/verify-session")
                    .header(header::COOKIE, format!("{SESSION_COOKIE}=not-a-token"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
