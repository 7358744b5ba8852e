//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Stripe API error
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Session token malformed, tampered with, expired or unpaid
    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            PaymentError::Stripe(_) => "Failed to create checkout session",
            PaymentError::InvalidToken(_) => "Session expired or invalid",
            PaymentError::Config(_) => "Stripe not configured",
        }
    }
}
