//! # Stripe Webhook Gateway
//!
//! Verifies, decodes and dispatches Stripe notifications.
//!
//! ```text
//! Received ─► Verifying ─┬─► Rejected (signature)
//!                        └─► Decoding ─┬─► Rejected (decode)
//!                                      └─► Dispatching ─► Acknowledged
//! ```
//!
//! Each step gates the next; the body is not parsed until its signature
//! checks out. Successful charges are published on `payment.succeeded`;
//! every other verified kind is logged and acknowledged. There is no
//! deduplication: a redelivered notification publishes again.

use crate::config::StripeConfig;
use crate::signature::{SignatureVerifier, SIGNATURE_HEADER};
use async_trait::async_trait;
use chrono::Utc;
use relay_core::{
    ChargeDetails, DecodeError, EventKind, ForwardedPaymentEvent, HandlingOutcome,
    NotificationGateway, RawNotification, SharedPublisher, VerifiedEvent,
    PAYMENT_SUCCEEDED_TOPIC,
};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

/// Stripe event type for a successful charge
pub const CHARGE_SUCCEEDED: &str = "charge.succeeded";

/// Webhook gateway for Stripe notifications
pub struct StripeWebhookGateway {
    verifier: SignatureVerifier,
    publisher: SharedPublisher,
}

impl StripeWebhookGateway {
    pub fn new(config: &StripeConfig, publisher: SharedPublisher) -> Self {
        Self {
            verifier: SignatureVerifier::new(
                config.webhook_secret.clone(),
                config.webhook_tolerance_secs,
            ),
            publisher,
        }
    }

    /// Build directly from a verifier (for tests and custom secrets)
    pub fn with_verifier(verifier: SignatureVerifier, publisher: SharedPublisher) -> Self {
        Self {
            verifier,
            publisher,
        }
    }

    /// Run the full pipeline with an explicit clock.
    pub async fn handle_at(&self, raw: RawNotification<'_>, now: i64) -> HandlingOutcome {
        if let Err(e) = self.verifier.verify(raw.payload, raw.signature, now) {
            warn!("Rejecting webhook: signature verification failed: {}", e);
            return HandlingOutcome::rejected_signature(e);
        }

        let event = match decode_event(raw.payload) {
            Ok(event) => event,
            Err(e) => {
                error!(
                    "Rejecting webhook: verified payload violates the Stripe event contract: {}",
                    e
                );
                return HandlingOutcome::rejected_decode(e);
            }
        };

        debug!("Verified Stripe webhook: id={}, type={}", event.id, event.kind.as_str());

        self.dispatch(event).await;
        HandlingOutcome::Acknowledged
    }

    async fn dispatch(&self, event: VerifiedEvent) {
        match &event.kind {
            EventKind::SuccessfulCharge(charge) => {
                let forwarded = ForwardedPaymentEvent::from(charge);

                if forwarded.order_id.is_none() {
                    warn!(
                        "Charge {} carries no {} metadata, forwarding without an order",
                        forwarded.payment_id,
                        relay_core::ORDER_ID_METADATA_KEY
                    );
                }

                // Publish failures never change the outcome
                match self
                    .publisher
                    .publish(PAYMENT_SUCCEEDED_TOPIC, &forwarded)
                    .await
                {
                    Ok(()) => info!(
                        payment_id = %forwarded.payment_id,
                        order_id = ?forwarded.order_id,
                        "Forwarded {}",
                        PAYMENT_SUCCEEDED_TOPIC
                    ),
                    Err(e) => error!(
                        payment_id = %forwarded.payment_id,
                        "Failed to publish {}: {}",
                        PAYMENT_SUCCEEDED_TOPIC,
                        e
                    ),
                }
            }
            EventKind::Other(kind) => {
                info!("Unhandled event type {} (id={})", kind, event.id);
            }
        }
    }
}

#[async_trait]
impl NotificationGateway for StripeWebhookGateway {
    #[instrument(skip(self, raw), fields(payload_len = raw.payload.len()))]
    async fn handle_notification(&self, raw: RawNotification<'_>) -> HandlingOutcome {
        self.handle_at(raw, Utc::now().timestamp()).await
    }

    fn signature_header(&self) -> &'static str {
        SIGNATURE_HEADER
    }
}

// =============================================================================
// Decoding
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeWebhookEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    data: StripeEventData,
}

#[derive(Debug, Deserialize)]
struct StripeEventData {
    object: serde_json::Value,
}

/// Decode verified bytes into a typed event.
pub fn decode_event(payload: &[u8]) -> Result<VerifiedEvent, DecodeError> {
    let event: StripeWebhookEvent = serde_json::from_slice(payload)
        .map_err(|e| DecodeError::InvalidEvent(e.to_string()))?;

    let kind = match event.event_type.as_str() {
        CHARGE_SUCCEEDED => EventKind::SuccessfulCharge(decode_charge(&event.data.object)?),
        other => EventKind::Other(other.to_string()),
    };

    Ok(VerifiedEvent {
        id: event.id,
        kind,
        data: event.data.object,
    })
}

fn decode_charge(object: &serde_json::Value) -> Result<ChargeDetails, DecodeError> {
    if !object.get("id").is_some_and(|id| id.is_string()) {
        return Err(DecodeError::MissingField {
            kind: CHARGE_SUCCEEDED.to_string(),
            field: "id",
        });
    }

    ChargeDetails::deserialize(object).map_err(|e| DecodeError::InvalidEvent(e.to_string()))
}
