//! # HTTP Event Publisher
//!
//! Forwards `payment.succeeded` events to an external sink over HTTP.
//!
//! Each publish spawns its own request and returns immediately; the webhook
//! that triggered it is acknowledged without waiting for the sink. Failed
//! deliveries are logged and dropped.

use async_trait::async_trait;
use relay_core::{EventPublisher, ForwardedPaymentEvent, PaymentResult};
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

/// Envelope POSTed to the sink
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    topic: &'a str,
    data: &'a ForwardedPaymentEvent,
}

/// Fire-and-forget publisher posting JSON to a fixed URL
#[derive(Debug, Clone)]
pub struct HttpEventPublisher {
    client: Client,
    sink_url: String,
}

impl HttpEventPublisher {
    pub fn new(client: Client, sink_url: impl Into<String>) -> Self {
        Self {
            client,
            sink_url: sink_url.into(),
        }
    }
}

#[async_trait]
impl EventPublisher for HttpEventPublisher {
    async fn publish(&self, topic: &str, event: &ForwardedPaymentEvent) -> PaymentResult<()> {
        let request = self.client.post(&self.sink_url).json(&Envelope {
            topic,
            data: event,
        });
        let topic = topic.to_string();
        let payment_id = event.payment_id.clone();

        tokio::spawn(async move {
            match request.send().await {
                Ok(resp) if resp.status().is_success() => {
                    info!("Event sink accepted {} for {}", topic, payment_id);
                }
                Ok(resp) => {
                    error!(
                        "Event sink rejected {} for {}: {}",
                        topic,
                        payment_id,
                        resp.status()
                    );
                }
                Err(e) => {
                    error!("Failed to forward {} for {}: {}", topic, payment_id, e);
                }
            }
        });

        Ok(())
    }
}
