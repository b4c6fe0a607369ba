//! # relay-core
//!
//! Core types and traits for checkout-relay.
//!
//! This crate provides:
//! - `CheckoutRequest` / `CheckoutResult` for session creation
//! - `SessionBuilder` and `NotificationGateway` traits for processor integrations
//! - The webhook pipeline types, from `RawNotification` to `ForwardedPaymentEvent`
//! - `EventPublisher` and in-process publishers for downstream emission
//! - `PaymentError`, `SignatureError` and `DecodeError`
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_core::{CheckoutRequest, SessionBuilder};
//!
//! let request = CheckoutRequest::new("ord_42", "usd").with_item("Tee", 25.0, 2);
//! let result = builder.create_session(&request).await?;
//!
//! // Redirect user to result.url
//! ```

pub mod checkout;
pub mod error;
pub mod event;
pub mod publisher;
pub mod strategy;

// Re-exports for convenience
pub use checkout::{to_minor_units, CheckoutItem, CheckoutRequest, CheckoutResult};
pub use error::{DecodeError, PaymentError, PaymentResult, SignatureError};
pub use event::{
    ChargeDetails, EventKind, ForwardedPaymentEvent, HandlingOutcome, RawNotification,
    RejectReason, VerifiedEvent, ORDER_ID_METADATA_KEY, PAYMENT_SUCCEEDED_TOPIC,
};
pub use publisher::{
    ChannelPublisher, EventPublisher, LoggingPublisher, PublishedMessage, SharedPublisher,
};
pub use strategy::{
    NotificationGateway, SessionBuilder, SharedNotificationGateway, SharedSessionBuilder,
};
