//! # relay-api
//!
//! HTTP API layer for checkout-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Checkout session endpoint
//! - Stripe webhook endpoint
//! - `HttpEventPublisher` for forwarding payment events
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/payments/create-payment-session` | Create checkout session |
//! | GET | `/payments/success` | Success landing |
//! | GET | `/payments/cancelled` | Cancel landing |
//! | POST | `/payments/webhook` | Stripe webhook |

pub mod handlers;
pub mod publisher;
pub mod routes;
pub mod state;

pub use publisher::HttpEventPublisher;
pub use routes::create_router;
pub use state::{AppConfig, AppState};
