//! # Request Handlers
//!
//! Axum request handlers for the payment API.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use relay_core::{CheckoutRequest, CheckoutResult, HandlingOutcome, PaymentError, RawNotification};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

/// Body of the redirect landing endpoints
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub ok: bool,
    pub message: &'static str,
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "checkout-relay",
        "provider": state.sessions.provider_name(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a checkout session
#[instrument(skip(state, request), fields(order_id = %request.order_id, items = request.items.len()))]
pub async fn create_payment_session(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResult>, (StatusCode, Json<ErrorResponse>)> {
    let result = state.sessions.create_session(&request).await.map_err(|e| {
        if e.is_upstream() {
            error!("Failed to create checkout session: {}", e);
        } else {
            warn!("Checkout request refused: {}", e);
        }
        payment_error_to_response(e)
    })?;

    info!("Checkout session ready for order {}", request.order_id);
    Ok(Json(result))
}

/// Receive a processor webhook.
///
/// The body is taken as raw bytes; any re-serialization before verification
/// would break the signature.
#[instrument(skip(state, headers, body))]
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let signature = headers
        .get(state.gateway.signature_header())
        .and_then(|v| v.to_str().ok());

    match state
        .gateway
        .handle_notification(RawNotification::new(&body, signature))
        .await
    {
        HandlingOutcome::Acknowledged => StatusCode::OK,
        HandlingOutcome::Rejected { reason } => {
            info!("Webhook rejected: {}", reason);
            StatusCode::BAD_REQUEST
        }
    }
}

/// Checkout success landing
pub async fn payment_success() -> Json<StatusMessage> {
    Json(StatusMessage {
        ok: true,
        message: "Payment successful",
    })
}

/// Checkout cancel landing
pub async fn payment_cancelled() -> Json<StatusMessage> {
    Json(StatusMessage {
        ok: true,
        message: "Payment cancelled",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_payment_error_conversion() {
        let (status, _json) =
            payment_error_to_response(PaymentError::Validation("no items".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _json) = payment_error_to_response(PaymentError::Upstream {
            provider: "stripe".to_string(),
            message: "Invalid currency".to_string(),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
