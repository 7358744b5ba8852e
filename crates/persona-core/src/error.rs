//! Error Types

use thiserror::Error;

/// Result type alias for chat operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Chat error types
#[derive(Error, Debug)]
pub enum ChatError {
    /// Malformed client input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing required credential or configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream rejected our credential
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Upstream throttling
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Missing, invalid or expired session token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Any other upstream provider failure
    #[error("Provider error: {0}")]
    Provider(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl ChatError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Validation(msg) => msg.clone(),
            ChatError::Config(_) => "Service configuration error.".into(),
            ChatError::Auth(_) => "Invalid API key".into(),
            ChatError::RateLimited(_) => "Rate limit exceeded. Please try again later.".into(),
            ChatError::Unauthorized(_) => "Session expired or invalid".into(),
            _ => "Failed to process request".into(),
        }
    }
}

impl From<anyhow::Error> for ChatError {
    fn from(err: anyhow::Error) -> Self {
        ChatError::Other(err.to_string())
    }
}
