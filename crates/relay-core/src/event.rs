//! # Webhook Event Types
//!
//! Types flowing through the webhook pipeline, from the untrusted
//! `RawNotification` to the `ForwardedPaymentEvent` handed downstream.

use crate::error::{DecodeError, SignatureError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Topic carrying successful-charge events downstream
pub const PAYMENT_SUCCEEDED_TOPIC: &str = "payment.succeeded";

/// Metadata key the session builder stores the order id under
pub const ORDER_ID_METADATA_KEY: &str = "orderId";

/// Unverified webhook input: the exact request body and its signature header.
///
/// Nothing in here may be trusted or parsed until the signature checks out.
#[derive(Clone, Copy)]
pub struct RawNotification<'a> {
    pub payload: &'a [u8],
    pub signature: Option<&'a str>,
}

impl<'a> RawNotification<'a> {
    pub fn new(payload: &'a [u8], signature: Option<&'a str>) -> Self {
        Self { payload, signature }
    }
}

impl std::fmt::Debug for RawNotification<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawNotification")
            .field("payload_len", &self.payload.len())
            .field("has_signature", &self.signature.is_some())
            .finish()
    }
}

/// The charge object of a successful-charge event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChargeDetails {
    pub id: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub metadata: HashMap<String, String>,

    #[serde(default)]
    pub receipt_url: Option<String>,
}

impl ChargeDetails {
    /// Order id recovered from the charge metadata, if the session set one
    pub fn order_id(&self) -> Option<&str> {
        self.metadata
            .get(ORDER_ID_METADATA_KEY)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<HashMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Event kinds the relay distinguishes. Anything else stays `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    SuccessfulCharge(ChargeDetails),
    Other(String),
}

impl EventKind {
    /// Processor name for the kind
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::SuccessfulCharge(_) => "charge.succeeded",
            EventKind::Other(kind) => kind,
        }
    }
}

/// A notification that passed signature verification and decoding
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedEvent {
    /// Processor event id
    pub id: String,
    pub kind: EventKind,
    /// The event's data object as sent
    pub data: serde_json::Value,
}

/// Normalized message published for a successful charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardedPaymentEvent {
    pub payment_id: String,
    /// `None` when the charge carried no order id metadata
    pub order_id: Option<String>,
    pub receipt_url: Option<String>,
}

impl From<&ChargeDetails> for ForwardedPaymentEvent {
    fn from(charge: &ChargeDetails) -> Self {
        Self {
            payment_id: charge.id.clone(),
            order_id: charge.order_id().map(String::from),
            receipt_url: charge.receipt_url.clone(),
        }
    }
}

/// Why a notification was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Signature(SignatureError),
    Decode(DecodeError),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Signature(e) => write!(f, "signature: {}", e),
            RejectReason::Decode(e) => write!(f, "decode: {}", e),
        }
    }
}

/// Terminal result of handling one notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlingOutcome {
    Acknowledged,
    Rejected { reason: RejectReason },
}

impl HandlingOutcome {
    pub fn rejected_signature(err: SignatureError) -> Self {
        HandlingOutcome::Rejected {
            reason: RejectReason::Signature(err),
        }
    }

    pub fn rejected_decode(err: DecodeError) -> Self {
        HandlingOutcome::Rejected {
            reason: RejectReason::Decode(err),
        }
    }

    pub fn is_acknowledged(&self) -> bool {
        matches!(self, HandlingOutcome::Acknowledged)
    }

    /// HTTP status the processor should receive
    pub fn status_code(&self) -> u16 {
        match self {
            HandlingOutcome::Acknowledged => 200,
            HandlingOutcome::Rejected { .. } => 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn charge(metadata: serde_json::Value) -> ChargeDetails {
        serde_json::from_value(json!({
            "id": "ch_1",
            "object": "charge",
            "metadata": metadata,
            "receipt_url": "https://pay.stripe.com/receipts/ch_1"
        }))
        .unwrap()
    }

    #[test]
    fn test_forwarded_event_from_charge() {
        let charge = charge(json!({ "orderId": "ord_42" }));
        let event = ForwardedPaymentEvent::from(&charge);

        assert_eq!(event.payment_id, "ch_1");
        assert_eq!(event.order_id.as_deref(), Some("ord_42"));
        assert_eq!(
            event.receipt_url.as_deref(),
            Some("https://pay.stripe.com/receipts/ch_1")
        );
    }

    #[test]
    fn test_missing_order_id_is_explicit_null() {
        let event = ForwardedPaymentEvent::from(&charge(json!({})));
        assert_eq!(event.order_id, None);

        let value = serde_json::to_value(&event).unwrap();
        assert!(value["orderId"].is_null());
        assert_eq!(value["paymentId"], "ch_1");
    }

    #[test]
    fn test_empty_order_id_treated_as_missing() {
        let event = ForwardedPaymentEvent::from(&charge(json!({ "orderId": "" })));
        assert_eq!(event.order_id, None);
    }

    #[test]
    fn test_null_or_absent_metadata_is_empty() {
        assert!(charge(serde_json::Value::Null).metadata.is_empty());

        let absent: ChargeDetails = serde_json::from_value(json!({ "id": "ch_2" })).unwrap();
        assert!(absent.metadata.is_empty());
        assert_eq!(absent.order_id(), None);
    }

    #[test]
    fn test_outcome_status_codes() {
        assert_eq!(HandlingOutcome::Acknowledged.status_code(), 200);
        assert_eq!(
            HandlingOutcome::rejected_signature(SignatureError::Mismatch).status_code(),
            400
        );
        assert_eq!(
            HandlingOutcome::rejected_decode(DecodeError::InvalidEvent("eof".into()))
                .status_code(),
            400
        );
    }

    #[test]
    fn test_raw_notification_debug_hides_payload() {
        let raw = RawNotification::new(b"{\"secret\":true}", Some("t=1,v1=ab"));
        let debug = format!("{:?}", raw);

        assert!(debug.contains("payload_len"));
        assert!(!debug.contains("secret"));
        assert!(!debug.contains("v1=ab"));
    }
}
