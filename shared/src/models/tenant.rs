//! Tenant Settings Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-tenant ordering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantSettings {
    pub tenant_id: i64,
    /// Default delivery fee, falls back to the server default when unset
    pub delivery_fee: Option<Decimal>,
    /// Minutes added to the preparation estimate for delivery orders
    #[serde(default)]
    pub delivery_lead_minutes: u32,
}
