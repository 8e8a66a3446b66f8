//! Request payloads for order operations

use super::types::{DeliveryAddress, OrderKind, OrderStatus, PaymentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cart line as submitted by the caller (prices come from the catalog)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemInput {
    pub product_id: i64,
    pub quantity: i32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<CartModifierInput>,
}

/// Modifier selection on a cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartModifierInput {
    pub modifier_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// Create order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub kind: OrderKind,
    #[serde(default)]
    pub customer_id: Option<i64>,
    pub items: Vec<CartItemInput>,
    #[serde(default)]
    pub delivery_address: Option<DeliveryAddress>,
    #[serde(default)]
    pub table_id: Option<i64>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    /// Explicit delivery fee, overrides the tenant default
    #[serde(default)]
    pub delivery_fee: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Idempotency key
    #[serde(default)]
    pub client_request_id: Option<String>,
}

/// Update order payload
///
/// Only `notes`, `delivery_address` and `table_id` are editable. The remaining
/// fields exist so that a caller trying to change them gets a precise error
/// instead of having them silently dropped; any other field fails to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<DeliveryAddress>,
    #[serde(default)]
    pub table_id: Option<i64>,

    // === Not editable ===
    #[serde(default)]
    pub items: Option<Vec<CartItemInput>>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    pub delivery_fee: Option<Decimal>,
    #[serde(default)]
    pub discount_amount: Option<Decimal>,
    #[serde(default)]
    pub total: Option<Decimal>,

    #[serde(default)]
    pub expected_status: Option<OrderStatus>,
}

impl UpdateOrderRequest {
    /// First field outside the editable set that the caller tried to set
    pub fn non_editable_field(&self) -> Option<&'static str> {
        if self.items.is_some() {
            Some("items")
        } else if self.coupon_code.is_some() {
            Some("coupon_code")
        } else if self.subtotal.is_some() {
            Some("subtotal")
        } else if self.delivery_fee.is_some() {
            Some("delivery_fee")
        } else if self.discount_amount.is_some() {
            Some("discount_amount")
        } else if self.total.is_some() {
            Some("total")
        } else {
            None
        }
    }
}

/// Accept order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptOrderRequest {
    pub estimated_preparation_minutes: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Reject order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectOrderRequest {
    pub reason: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Status change payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
    /// Status the caller last read; mismatch with the committed status is a conflict
    #[serde(default)]
    pub expected_status: Option<OrderStatus>,
}

/// Consumed payment state payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub status: PaymentStatus,
    #[serde(default)]
    pub reference: Option<String>,
}

/// List query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for OrderListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
            status: None,
        }
    }
}
