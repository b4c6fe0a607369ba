//! # Stripe Checkout Sessions
//!
//! Maps a `CheckoutRequest` onto the Stripe Checkout Sessions API.
//! One request per call, no retries.

use crate::config::StripeConfig;
use async_trait::async_trait;
use relay_core::{
    CheckoutRequest, CheckoutResult, PaymentError, PaymentResult, SessionBuilder,
    ORDER_ID_METADATA_KEY,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

const PROVIDER: &str = "stripe";

/// Creates Stripe-hosted checkout sessions in `payment` mode.
///
/// Redirect targets always come from `StripeConfig`, never from the request.
pub struct StripeSessionBuilder {
    config: StripeConfig,
    client: Client,
}

impl StripeSessionBuilder {
    pub fn new(config: StripeConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Use a caller-supplied HTTP client
    pub fn with_client(config: StripeConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Form body for `POST /v1/checkout/sessions`
    fn build_form_params(&self, request: &CheckoutRequest) -> Vec<(String, String)> {
        let currency = request.currency.to_lowercase();

        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), self.config.success_url.clone()),
            ("cancel_url".to_string(), self.config.cancel_url.clone()),
            (
                format!("payment_intent_data[metadata][{}]", ORDER_ID_METADATA_KEY),
                request.order_id.clone(),
            ),
        ];

        for (i, item) in request.items.iter().enumerate() {
            form_params.push((
                format!("line_items[{}][price_data][currency]", i),
                currency.clone(),
            ));
            form_params.push((
                format!("line_items[{}][price_data][product_data][name]", i),
                item.name.clone(),
            ));
            form_params.push((
                format!("line_items[{}][price_data][unit_amount]", i),
                item.unit_amount().to_string(),
            ));
            form_params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
        }

        form_params
    }
}

#[async_trait]
impl SessionBuilder for StripeSessionBuilder {
    #[instrument(skip(self, request), fields(order_id = %request.order_id, items = request.items.len()))]
    async fn create_session(&self, request: &CheckoutRequest) -> PaymentResult<CheckoutResult> {
        if let Err(e) = request.validate() {
            warn!("Rejecting checkout request: {}", e);
            return Err(e);
        }

        let form_params = self.build_form_params(request);
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let idempotency_key = uuid::Uuid::new_v4().to_string();

        debug!(
            "Creating Stripe checkout session: {} items, currency={}",
            request.items.len(),
            request.currency
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &idempotency_key)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| {
                error!("Stripe request failed: {}", e);
                PaymentError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}", status);

            let message = match serde_json::from_str::<StripeErrorResponse>(&body) {
                Ok(error_response) => error_response.error.message,
                Err(_) => format!("HTTP {}: {}", status, body),
            };

            return Err(PaymentError::Upstream {
                provider: PROVIDER.to_string(),
                message,
            });
        }

        let session: StripeCheckoutSessionResponse = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        let url = session.url.ok_or_else(|| PaymentError::Upstream {
            provider: PROVIDER.to_string(),
            message: format!("session {} has no redirect url", session.id),
        })?;

        info!("Created Stripe checkout session: id={}", session.id);

        Ok(CheckoutResult {
            url,
            success_url: session
                .success_url
                .unwrap_or_else(|| self.config.success_url.clone()),
            cancel_url: session
                .cancel_url
                .unwrap_or_else(|| self.config.cancel_url.clone()),
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    success_url: Option<String>,
    #[serde(default)]
    cancel_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
