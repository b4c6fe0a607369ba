//! # checkout-relay
//!
//! Stripe checkout sessions in, `payment.succeeded` events out.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_WEBHOOK_SECRET=whsec_...
//! export STRIPE_SUCCESS_URL=https://shop.example/payments/success
//! export STRIPE_CANCEL_URL=https://shop.example/payments/cancelled
//! export EVENT_SINK_URL=http://orders.internal/events   # optional
//!
//! # Run the server
//! checkout-relay
//! ```

use relay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let state = AppState::from_env()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.sessions.provider_name());

    let app = routes::create_router(state);

    info!("checkout-relay starting on http://{}", addr);

    if !is_prod {
        info!("Checkout: POST http://{}/payments/create-payment-session", addr);
        info!("Webhook: POST http://{}/payments/webhook", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `LOG_FORMAT=json` switches to structured output
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}
