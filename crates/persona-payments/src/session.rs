//! Session Tokens
//!
//! Signed, time-limited proof of payment. A token asserts "checkout session
//! X was paid" and is minted exactly once, by the payment-success handler,
//! after Stripe confirms the paid status. It lives in an HTTP-only cookie
//! and expires 24 hours after issuance; there is no server-side revocation.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{PaymentError, Result};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "chat_session";

/// Token (and cookie) lifetime: 24 hours
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24;

/// Claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — the Stripe checkout session id
    pub sub: String,
    /// Payment confirmation; always true at issuance and required on verify
    pub paid: bool,
    /// Issued at (unix timestamp)
    pub iat: i64,
    /// Expiry (unix timestamp, iat + 24h)
    pub exp: i64,
}

/// Issues and verifies HS256-signed session tokens
pub struct SessionTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionTokenCodec {
    /// Create a codec from the process-wide signing secret
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The 24h expiry is exact; jsonwebtoken's default 60s leeway would
        // accept tokens past it.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for a paid checkout session, valid for 24 hours
    pub fn issue(&self, checkout_session_id: &str) -> Result<String> {
        self.issue_at(checkout_session_id, Utc::now().timestamp())
    }

    /// Issue with an explicit issued-at timestamp.
    ///
    /// `issue` delegates here; tests use it directly to place tokens on
    /// either side of the expiry boundary.
    pub fn issue_at(&self, checkout_session_id: &str, issued_at: i64) -> Result<String> {
        let claims = SessionClaims {
            sub: checkout_session_id.to_string(),
            paid: true,
            iat: issued_at,
            exp: issued_at + SESSION_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| PaymentError::InvalidToken(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Fails on bad signature, malformed token, expiry, or a `paid` claim
    /// that is not true. Pure read; safe to call repeatedly.
    pub fn verify(&self, token: &str) -> Result<SessionClaims> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| PaymentError::InvalidToken(e.to_string()))?;

        if !data.claims.paid {
            return Err(PaymentError::InvalidToken("session not paid".into()));
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> SessionTokenCodec {
        SessionTokenCodec::new("test-secret")
    }

    #[test]
    fn test_round_trip() {
        let codec = codec();
        let token = codec.issue("cs_test_123").unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.sub, "cs_test_123");
        assert!(claims.paid);
        assert_eq!(claims.exp, claims.iat + SESSION_TTL_SECS);
    }

    #[test]
    fn test_verify_is_idempotent() {
        let codec = codec();
        let token = codec.issue("cs_test_123").unwrap();

        let first = codec.verify(&token).unwrap();
        let second = codec.verify(&token).unwrap();
        assert_eq!(first.sub, second.sub);
        assert_eq!(first.exp, second.exp);
    }

    #[test]
    fn test_expiry_boundary() {
        let codec = codec();
        let now = Utc::now().timestamp();

        // Issued 24h − 1s ago: one second of validity left
        let fresh = codec.issue_at("cs_test_123", now - (SESSION_TTL_SECS - 1)).unwrap();
        assert!(codec.verify(&fresh).is_ok());

        // Issued 24h + 1s ago: expired one second ago
        let stale = codec.issue_at("cs_test_123", now - (SESSION_TTL_SECS + 1)).unwrap();
        assert!(codec.verify(&stale).is_err());
    }

    #[test]
    fn test_tampered_token_fails() {
        let codec = codec();
        let token = codec.issue("cs_test_123").unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(codec.verify(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = codec().issue("cs_test_123").unwrap();
        let other = SessionTokenCodec::new("other-secret");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_unpaid_claims_fail() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "cs_test_123".into(),
            paid: false,
            iat: now,
            exp: now + SESSION_TTL_SECS,
        };
        // Signed with the right key but paid=false
        let token = encode(&Header::default(), &claims, &codec.encoding).unwrap();

        let err = codec.verify(&token).unwrap_err();
        assert!(matches!(err, PaymentError::InvalidToken(_)));
    }

    #[test]
    fn test_garbage_token_fails() {
        assert!(codec().verify("definitely-not-a-jwt").is_err());
    }
}
