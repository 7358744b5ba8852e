//! Stripe Checkout Integration
//!
//! Implements the "Stripe Checkout (Hosted)" approach for the single $5
//! chat-session product: create a hosted checkout session, then look the
//! session back up on the success redirect to confirm it was paid.

use std::str::FromStr;

use stripe::{
    CheckoutSession, CheckoutSessionId, CheckoutSessionMode,
    CheckoutSessionPaymentStatus, Client, CreateCheckoutSession,
    CreateCheckoutSessionLineItems, CreateCheckoutSessionLineItemsPriceData,
    CreateCheckoutSessionLineItemsPriceDataProductData,
    CreateCheckoutSessionPaymentMethodTypes, Currency,
};

use persona_core::persona;

use crate::error::{PaymentError, Result};

/// Payment status of a checkout session, as reported by Stripe
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaidStatus {
    /// Payment completed
    Paid,
    /// Anything other than "paid" (unpaid, no_payment_required, ...)
    NotPaid,
}

/// Stripe client wrapper for the chat-session product
pub struct StripeCheckout {
    client: Client,
}

impl StripeCheckout {
    /// Create a new Stripe client
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(secret_key),
        }
    }

    /// Create a hosted checkout session for one chat session.
    ///
    /// Returns the URL to redirect the buyer to. The success URL carries
    /// Stripe's `{CHECKOUT_SESSION_ID}` placeholder, substituted by Stripe
    /// with the concrete session id on redirect.
    pub async fn create_chat_checkout(&self, base_url: &str) -> Result<String> {
        let success_url =
            format!("{base_url}/api/payment-success?session_id={{CHECKOUT_SESSION_ID}}");
        let cancel_url = base_url.to_string();
        let image_url = format!("{base_url}{}", persona::PRODUCT_IMAGE_PATH);

        let mut params = CreateCheckoutSession::new();
        params.success_url = Some(&success_url);
        params.cancel_url = Some(&cancel_url);
        params.mode = Some(CheckoutSessionMode::Payment);
        params.payment_method_types = Some(vec![CreateCheckoutSessionPaymentMethodTypes::Card]);

        let mut metadata = std::collections::HashMap::new();
        metadata.insert("product".to_string(), "chat_session".to_string());
        params.metadata = Some(metadata);

        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            quantity: Some(1),
            price_data: Some(CreateCheckoutSessionLineItemsPriceData {
                currency: Currency::USD,
                unit_amount: Some(persona::CHAT_PRICE_CENTS),
                product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                    name: persona::PRODUCT_NAME.to_string(),
                    description: Some(persona::PRODUCT_DESCRIPTION.to_string()),
                    images: Some(vec![image_url]),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }]);

        let session = CheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        session
            .url
            .ok_or_else(|| PaymentError::Stripe("No checkout URL returned".into()))
    }

    /// Look up a checkout session and report whether it was paid.
    ///
    /// A malformed id is a Stripe error like any other; callers treat every
    /// failure path the same way (no cookie, back to the landing page).
    pub async fn payment_status(&self, session_id: &str) -> Result<PaidStatus> {
        let id = CheckoutSessionId::from_str(session_id)
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        let session = CheckoutSession::retrieve(&self.client, &id, &[])
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        match session.payment_status {
            CheckoutSessionPaymentStatus::Paid => Ok(PaidStatus::Paid),
            _ => Ok(PaidStatus::NotPaid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_is_five_dollars() {
        assert_eq!(persona::CHAT_PRICE_CENTS, 500);
    }

    #[test]
    fn test_malformed_session_id_is_rejected_locally() {
        // CheckoutSessionId requires the cs_ prefix; no network call is made
        let err = CheckoutSessionId::from_str("not-a-session-id").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
