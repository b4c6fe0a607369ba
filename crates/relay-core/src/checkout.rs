//! # Checkout Types
//!
//! Request and result shapes for hosted checkout sessions.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};

/// An item to be charged in a checkout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutItem {
    /// Product name shown on the hosted page
    pub name: String,

    /// Unit price in major currency units (e.g. 19.99)
    pub price: f64,

    /// Quantity
    pub quantity: u32,
}

impl CheckoutItem {
    pub fn new(name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Unit price in minor currency units, as the processor expects it
    pub fn unit_amount(&self) -> i64 {
        to_minor_units(self.price)
    }
}

/// A request to open a checkout session for one order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Internal order identifier, carried back in webhook metadata
    pub order_id: String,

    /// ISO 4217 currency code
    pub currency: String,

    /// Items to charge
    pub items: Vec<CheckoutItem>,
}

impl CheckoutRequest {
    pub fn new(order_id: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            currency: currency.into(),
            items: Vec::new(),
        }
    }

    /// Builder: add an item
    pub fn with_item(mut self, name: impl Into<String>, price: f64, quantity: u32) -> Self {
        self.items.push(CheckoutItem::new(name, price, quantity));
        self
    }

    /// Check the request invariants before anything is sent upstream.
    pub fn validate(&self) -> PaymentResult<()> {
        if self.items.is_empty() {
            return Err(PaymentError::Validation(
                "checkout request has no items".to_string(),
            ));
        }

        for (i, item) in self.items.iter().enumerate() {
            // NaN fails this comparison too
            if !(item.price > 0.0) || !item.price.is_finite() {
                return Err(PaymentError::Validation(format!(
                    "item {} ({}) has non-positive price {}",
                    i, item.name, item.price
                )));
            }
            if item.quantity == 0 {
                return Err(PaymentError::Validation(format!(
                    "item {} ({}) has zero quantity",
                    i, item.name
                )));
            }
        }

        Ok(())
    }
}

/// Redirect targets of a created checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    /// Hosted checkout page to send the customer to
    pub url: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// Convert a major-unit decimal amount to integer minor units.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_unit_conversion() {
        assert_eq!(to_minor_units(10.99), 1099);
        assert_eq!(to_minor_units(19.99), 1999);
        assert_eq!(to_minor_units(0.5), 50);
        assert_eq!(to_minor_units(100.0), 10000);
    }

    #[test]
    fn test_validate_ok() {
        let req = CheckoutRequest::new("ord_1", "usd")
            .with_item("Widget", 9.99, 2)
            .with_item("Gadget", 0.5, 1);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_items() {
        let req = CheckoutRequest::new("ord_1", "usd");
        assert!(matches!(req.validate(), Err(PaymentError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_bad_items() {
        let zero_price = CheckoutRequest::new("ord_1", "usd").with_item("Free", 0.0, 1);
        assert!(matches!(
            zero_price.validate(),
            Err(PaymentError::Validation(_))
        ));

        let negative = CheckoutRequest::new("ord_1", "usd").with_item("Refund", -5.0, 1);
        assert!(negative.validate().is_err());

        let nan = CheckoutRequest::new("ord_1", "usd").with_item("Odd", f64::NAN, 1);
        assert!(nan.validate().is_err());

        let zero_qty = CheckoutRequest::new("ord_1", "usd").with_item("None", 5.0, 0);
        assert!(zero_qty.validate().is_err());
    }

    #[test]
    fn test_request_wire_shape() {
        let json = r#"{
            "orderId": "ord_42",
            "currency": "usd",
            "items": [{ "name": "Tee", "price": 25.5, "quantity": 2 }]
        }"#;
        let req: CheckoutRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.order_id, "ord_42");
        assert_eq!(req.items.len(), 1);
        assert_eq!(req.items[0].unit_amount(), 2550);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = CheckoutResult {
            url: "https://checkout.stripe.com/c/pay/cs_test".into(),
            success_url: "https://shop.test/payments/success".into(),
            cancel_url: "https://shop.test/payments/cancelled".into(),
        };
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["successUrl"], "https://shop.test/payments/success");
        assert_eq!(value["cancelUrl"], "https://shop.test/payments/cancelled");
    }
}
