//! # relay-stripe
//!
//! Stripe integration for checkout-relay.
//!
//! 1. **StripeSessionBuilder** - Checkout Sessions API
//!    - Order line items to `price_data` line items
//!    - Order id stored in payment intent metadata
//!    - Redirect URLs fixed by configuration
//!
//! 2. **StripeWebhookGateway** - webhook ingestion
//!    - `Stripe-Signature` verification over the raw body
//!    - Typed decoding of the event kind
//!    - `charge.succeeded` forwarded on `payment.succeeded`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_core::{LoggingPublisher, NotificationGateway, RawNotification};
//! use relay_stripe::{StripeConfig, StripeWebhookGateway};
//! use std::sync::Arc;
//!
//! let config = StripeConfig::from_env()?;
//! let gateway = StripeWebhookGateway::new(&config, Arc::new(LoggingPublisher));
//!
//! // In your webhook endpoint:
//! let outcome = gateway
//!     .handle_notification(RawNotification::new(&body, signature))
//!     .await;
//! ```

pub mod checkout;
pub mod config;
pub mod signature;
pub mod webhook;

// Re-exports
pub use checkout::StripeSessionBuilder;
pub use config::{StripeConfig, DEFAULT_WEBHOOK_TOLERANCE_SECS};
pub use signature::{
    compute_signature, signature_header, SignatureHeader, SignatureVerifier, SIGNATURE_HEADER,
};
pub use webhook::{decode_event, StripeWebhookGateway, CHARGE_SUCCEEDED};
