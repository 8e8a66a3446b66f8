//! Order aggregate
//!
//! Items and modifiers embed a name/price snapshot taken at creation,
//! so later catalog edits never change a persisted order.

use super::types::{Actor, DeliveryAddress, OrderKind, OrderStatus, PaymentStatus};
use crate::models::ModifierKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order root entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub tenant_id: i64,
    /// None for walk-in table guests
    pub customer_id: Option<i64>,
    pub kind: OrderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<DeliveryAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,

    // === Totals ===
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,

    // === Scheduling ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_preparation_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_position: Option<u64>,

    // === Payment (consumed state) ===
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_request_id: Option<String>,
    pub created_by: Actor,
    pub created_at: i64,
    pub updated_at: i64,
    /// Incremented on every committed mutation
    pub version: u64,
}

impl Order {
    /// Whether this order currently holds a queue position
    pub fn holds_queue_position(&self) -> bool {
        self.kind == OrderKind::TableService
            && self.queue_position.is_some()
            && !self.status.is_terminal()
    }
}

/// Order line item (snapshot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: i64,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<OrderItemModifier>,
    /// unit_price × quantity + Σ modifier subtotals
    pub subtotal: Decimal,
}

/// Modifier selection on an item (snapshot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemModifier {
    pub modifier_id: i64,
    pub kind: ModifierKind,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

/// Status history row (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusHistory {
    pub order_id: i64,
    /// 1-based, strictly increasing per order in commit order
    pub seq: u32,
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub actor: Actor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub timestamp: i64,
}

/// Rejection record (at most one per order)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRejection {
    pub order_id: i64,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub actor: Actor,
    pub timestamp: i64,
}

/// Order with its history and rejection (detail view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub history: Vec<OrderStatusHistory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<OrderRejection>,
}

/// One page of orders for a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPage {
    pub items: Vec<OrderDetail>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

/// Entry of the live TableService queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub order_id: i64,
    pub queue_position: u64,
    pub table_id: Option<i64>,
    pub status: OrderStatus,
    pub created_at: i64,
}

/// Priced cart without persistence (validate endpoint)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderQuote {
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}
