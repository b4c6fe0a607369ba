//! # Provider Traits
//!
//! The two seams a payment processor integration plugs into.
//!
//! ```text
//! ┌──────────────────────────┐      ┌──────────────────────────────┐
//! │  SessionBuilder (trait)  │      │  NotificationGateway (trait) │
//! │  └── create_session()    │      │  └── handle_notification()   │
//! └────────────▲─────────────┘      └──────────────▲───────────────┘
//!              │                                   │
//!   ┌──────────┴───────────┐          ┌────────────┴─────────────┐
//!   │ StripeSessionBuilder │          │   StripeWebhookGateway   │
//!   └──────────────────────┘          └──────────────────────────┘
//! ```
//!
//! The two sides share no state. They are correlated only through the
//! order id the session builder stores in processor metadata.

use crate::checkout::{CheckoutRequest, CheckoutResult};
use crate::error::PaymentResult;
use crate::event::{HandlingOutcome, RawNotification};
use async_trait::async_trait;
use std::sync::Arc;

/// Opens hosted checkout sessions with a processor.
#[async_trait]
pub trait SessionBuilder: Send + Sync {
    /// Create a checkout session and return its redirect URLs.
    ///
    /// Fails with `PaymentError::Validation` before any network call when
    /// the request violates its invariants.
    async fn create_session(&self, request: &CheckoutRequest) -> PaymentResult<CheckoutResult>;

    /// Get the provider name (for logging and routing).
    fn provider_name(&self) -> &'static str;
}

/// Turns signed processor notifications into acknowledgements.
///
/// Implementations never return an error: every path ends in
/// `Acknowledged` or `Rejected`.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn handle_notification(&self, raw: RawNotification<'_>) -> HandlingOutcome;

    /// Header carrying the notification signature
    fn signature_header(&self) -> &'static str;
}

pub type SharedSessionBuilder = Arc<dyn SessionBuilder>;
pub type SharedNotificationGateway = Arc<dyn NotificationGateway>;
