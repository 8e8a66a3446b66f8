//! Loyalty Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tenant loyalty program configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyProgram {
    pub tenant_id: i64,
    /// Points earned per currency unit of the order total
    pub points_per_unit: Decimal,
    /// Orders below this total earn nothing
    pub min_order_value: Decimal,
    /// Days until accrued points expire, None = never
    pub validity_days: Option<u32>,
    pub is_active: bool,
}

/// Why a ledger entry exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoyaltyReason {
    /// Accrual on a delivered order
    OrderCompleted,
    /// Manual correction by the loyalty subsystem
    Adjustment,
}

/// Loyalty ledger entry (signed point delta)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyEntry {
    pub id: i64,
    pub tenant_id: i64,
    pub customer_id: i64,
    pub points: i64,
    pub reason: LoyaltyReason,
    pub order_id: Option<i64>,
    pub expires_at: Option<i64>,
    pub created_at: i64,
}

impl LoyaltyEntry {
    /// Whether the entry still counts towards the balance at `now`
    pub fn is_live(&self, now: i64) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// Points balance of one customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyBalance {
    pub customer_id: i64,
    pub points: i64,
}
