//! # Application State
//!
//! Shared state for the Axum application: the session builder, the webhook
//! gateway and server settings. Everything is assembled once at startup.

use crate::publisher::HttpEventPublisher;
use relay_core::{
    LoggingPublisher, SharedNotificationGateway, SharedPublisher, SharedSessionBuilder,
};
use relay_stripe::{StripeConfig, StripeSessionBuilder, StripeWebhookGateway};
use std::sync::Arc;
use tracing::info;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Where `payment.succeeded` events are POSTed; logged only when unset
    pub event_sink_url: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            event_sink_url: std::env::var("EVENT_SINK_URL")
                .ok()
                .filter(|u| !u.is_empty()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Opens checkout sessions
    pub sessions: SharedSessionBuilder,
    /// Handles processor webhooks
    pub gateway: SharedNotificationGateway,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Assemble state from explicit parts
    pub fn new(
        config: AppConfig,
        sessions: SharedSessionBuilder,
        gateway: SharedNotificationGateway,
    ) -> Self {
        Self {
            sessions,
            gateway,
            config,
        }
    }

    /// Build the Stripe-backed state from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let stripe = StripeConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        let publisher: SharedPublisher = match &config.event_sink_url {
            Some(url) => {
                info!("Forwarding payment events to {}", url);
                Arc::new(HttpEventPublisher::new(reqwest::Client::new(), url.clone()))
            }
            None => {
                info!("EVENT_SINK_URL not set, payment events will only be logged");
                Arc::new(LoggingPublisher)
            }
        };

        let gateway = StripeWebhookGateway::new(&stripe, publisher);
        let sessions = StripeSessionBuilder::new(stripe);

        Ok(Self::new(config, Arc::new(sessions), Arc::new(gateway)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
            event_sink_url: None,
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
        assert!(!config.is_production());
    }

    #[test]
    fn test_invalid_socket_addr() {
        let config = AppConfig {
            host: "not a host".to_string(),
            port: 3000,
            environment: "production".to_string(),
            event_sink_url: None,
        };

        assert!(config.socket_addr().is_err());
        assert!(config.is_production());
    }
}
