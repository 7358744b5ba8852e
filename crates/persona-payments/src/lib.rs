//! # persona-payments
//!
//! Payment processing and session tokens for persona-chat.
//!
//! ## Flow: Stripe Checkout (Hosted)
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌──────────────────────┐
//! │  Landing    │────▶│  Stripe Hosted  │────▶│ /api/payment-success │
//! │  (buy $5)   │     │  Checkout Page  │     │ verify + set cookie  │
//! └─────────────┘     └─────────────────┘     └──────────────────────┘
//! ```
//!
//! One fixed product (a $5 chat session), one-shot payment mode. On return
//! from checkout the server retrieves the session, confirms it's paid, and
//! mints a signed, 24-hour session token delivered as an HTTP-only cookie.
//! There is no webhook and no server-side session store; the token itself is
//! the proof of payment.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use persona_payments::{SessionTokenCodec, StripeCheckout};
//!
//! let stripe = StripeCheckout::new("sk_test_xxx");
//! let url = stripe.create_chat_checkout("https://yoursite.com").await?;
//! // Redirect the buyer to `url`; on return:
//! let status = stripe.payment_status("cs_test_xxx").await?;
//! ```

mod checkout;
mod error;
mod session;

pub use checkout::{PaidStatus, StripeCheckout};
pub use error::{PaymentError, Result};
pub use session::{SessionClaims, SessionTokenCodec, SESSION_COOKIE, SESSION_TTL_SECS};
