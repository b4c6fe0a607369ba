//! # Event Publishers
//!
//! Downstream emission of forwarded payment events.
//!
//! Publishing is fire-and-forget from the gateway's point of view. A
//! publisher may hand the event to a transport and return before delivery;
//! whatever durability it offers is its own contract.

use crate::error::{PaymentError, PaymentResult};
use crate::event::ForwardedPaymentEvent;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Sink for forwarded payment events
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, topic: &str, event: &ForwardedPaymentEvent) -> PaymentResult<()>;
}

pub type SharedPublisher = Arc<dyn EventPublisher>;

/// Publisher that only logs. Used when no sink is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingPublisher;

#[async_trait]
impl EventPublisher for LoggingPublisher {
    async fn publish(&self, topic: &str, event: &ForwardedPaymentEvent) -> PaymentResult<()> {
        info!(
            topic,
            payment_id = %event.payment_id,
            order_id = ?event.order_id,
            "No event sink configured, dropping forwarded event"
        );
        Ok(())
    }
}

/// A message as it leaves a `ChannelPublisher`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub event: ForwardedPaymentEvent,
}

/// In-process publisher backed by an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelPublisher {
    tx: mpsc::UnboundedSender<PublishedMessage>,
}

impl ChannelPublisher {
    /// Create a publisher and the receiving end of its channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PublishedMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl EventPublisher for ChannelPublisher {
    async fn publish(&self, topic: &str, event: &ForwardedPaymentEvent) -> PaymentResult<()> {
        self.tx
            .send(PublishedMessage {
                topic: topic.to_string(),
                event: event.clone(),
            })
            .map_err(|_| PaymentError::Publish {
                topic: topic.to_string(),
                message: "receiver dropped".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PAYMENT_SUCCEEDED_TOPIC;

    fn event() -> ForwardedPaymentEvent {
        ForwardedPaymentEvent {
            payment_id: "ch_1".into(),
            order_id: Some("ord_42".into()),
            receipt_url: None,
        }
    }

    #[tokio::test]
    async fn test_channel_publisher_delivers() {
        let (publisher, mut rx) = ChannelPublisher::new();
        publisher
            .publish(PAYMENT_SUCCEEDED_TOPIC, &event())
            .await
            .unwrap();

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.topic, "payment.succeeded");
        assert_eq!(msg.event, event());
    }

    #[tokio::test]
    async fn test_channel_publisher_closed_receiver() {
        let (publisher, rx) = ChannelPublisher::new();
        drop(rx);

        let err = publisher
            .publish(PAYMENT_SUCCEEDED_TOPIC, &event())
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Publish { .. }));
    }

    #[tokio::test]
    async fn test_logging_publisher_accepts() {
        assert!(LoggingPublisher
            .publish(PAYMENT_SUCCEEDED_TOPIC, &event())
            .await
            .is_ok());
    }
}
