//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - POST /payments/create-payment-session - Create checkout session
/// - GET  /payments/success - Success landing
/// - GET  /payments/cancelled - Cancel landing
/// - POST /payments/webhook - Stripe webhook handler
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let checkout_routes = Router::new()
        .route(
            "/create-payment-session",
            post(handlers::create_payment_session),
        )
        .route("/success", get(handlers::payment_success))
        .route("/cancelled", get(handlers::payment_cancelled))
        .layer(cors);

    // Webhooks are server-to-server and must see the raw body
    let webhook_routes = Router::new().route("/webhook", post(handlers::payment_webhook));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/payments", checkout_routes.merge(webhook_routes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppConfig;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use relay_core::{LoggingPublisher, SessionBuilder};
    use relay_stripe::{StripeConfig, StripeSessionBuilder, StripeWebhookGateway};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        let stripe = StripeConfig::new(
            "sk_test_abc123",
            "whsec_secret",
            "https://shop.test/payments/success",
            "https://shop.test/payments/cancelled",
        );
        let gateway = StripeWebhookGateway::new(&stripe, Arc::new(LoggingPublisher));
        let sessions: Arc<dyn SessionBuilder> = Arc::new(StripeSessionBuilder::new(stripe));
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            event_sink_url: None,
        };
        AppState::new(config, sessions, Arc::new(gateway))
    }

    #[tokio::test]
    async fn test_landing_routes() {
        for uri in ["/payments/success", "/payments/cancelled", "/health"] {
            let response = create_router(state())
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        }
    }

    #[tokio::test]
    async fn test_webhook_requires_post() {
        let response = create_router(state())
            .oneshot(
                Request::builder()
                    .uri("/payments/webhook")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
